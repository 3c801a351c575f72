use crate::ir::BoardGraph;
use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub devices: Vec<DeviceDump>,
    pub wire_count: usize,
    pub rail_jumpers: Vec<RailJumperDump>,
}

#[derive(Debug, Serialize)]
pub struct DeviceDump {
    pub id: String,
    pub label: String,
    pub region: String,
    pub rotation_degrees: i32,
    pub cx: f32,
    pub cy: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct RailJumperDump {
    pub device: String,
    pub pin: String,
    pub rail: String,
    pub slot: u16,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, graph: &BoardGraph) -> Self {
        let devices = layout
            .devices
            .values()
            .map(|state| DeviceDump {
                id: state.id.clone(),
                label: graph
                    .device(&state.id)
                    .map(|d| d.label.clone())
                    .unwrap_or_default(),
                region: format!("{:?}", state.region),
                rotation_degrees: state.rotation.degrees(),
                cx: state.cx,
                cy: state.cy,
                width: state.size.width,
                height: state.size.height,
            })
            .collect();

        let rail_jumpers = layout
            .rails
            .as_ref()
            .map(|rails| {
                rails
                    .jumpers
                    .iter()
                    .map(|jumper| RailJumperDump {
                        device: jumper.device.clone(),
                        pin: jumper.pin.clone(),
                        rail: format!("{:?}", jumper.rail),
                        slot: jumper.slot,
                    })
                    .collect()
            })
            .unwrap_or_default();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            devices,
            wire_count: layout.wires.len(),
            rail_jumpers,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, graph: &BoardGraph) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, graph);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
