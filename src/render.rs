use serde::Serialize;

use crate::config::LayoutConfig;
use crate::ir::BoardGraph;
use crate::layout::{Layout, LayoutError, RailKind};
use crate::theme::Theme;

/// Drawing primitives consumed by the external rendering surface. The
/// engine never touches pixels; this display list is its only output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    SetCanvasSize {
        width: f32,
        height: f32,
    },
    PlaceImage {
        device: String,
        asset: String,
        x: f32,
        y: f32,
        rotation_degrees: i32,
    },
    DrawLabel {
        text: String,
        x: f32,
        y: f32,
    },
    DrawCurve {
        from: (f32, f32),
        c1: (f32, f32),
        c2: (f32, f32),
        to: (f32, f32),
        color: String,
        width: f32,
    },
    DrawStraightWire {
        from: (f32, f32),
        to: (f32, f32),
        color: String,
        width: f32,
    },
}

/// Walks a finished layout and emits the display list: canvas size,
/// device images in input order, labels, curved wires, and the rail
/// jumpers. Asset resolution happens here, at the renderer boundary;
/// a device without an asset fails the pass.
pub fn emit_draw_ops(
    graph: &BoardGraph,
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Vec<DrawOp>, LayoutError> {
    let mut ops = Vec::new();
    ops.push(DrawOp::SetCanvasSize {
        width: layout.width,
        height: layout.height,
    });

    let devices = std::iter::once(&graph.controller).chain(graph.peripherals.iter());
    for device in devices {
        let Some(state) = layout.device(&device.id) else {
            continue;
        };
        let asset = device
            .asset
            .clone()
            .ok_or_else(|| LayoutError::MissingAsset {
                device: device.id.clone(),
            })?;
        ops.push(DrawOp::PlaceImage {
            device: device.id.clone(),
            asset,
            x: state.cx,
            y: state.cy,
            rotation_degrees: state.rotation.degrees(),
        });
        if let Some((x, y)) = state.label_anchor {
            let text = if device.label.is_empty() {
                device.id.clone()
            } else {
                device.label.clone()
            };
            ops.push(DrawOp::DrawLabel { text, x, y });
        }
    }

    for wire in &layout.wires {
        ops.push(DrawOp::DrawCurve {
            from: wire.from,
            c1: wire.c1,
            c2: wire.c2,
            to: wire.to,
            color: wire.color.clone(),
            width: wire.width,
        });
    }

    if let Some(rails) = &layout.rails {
        for jumper in &rails.jumpers {
            let color = match jumper.rail {
                RailKind::Power => theme.power_color.clone(),
                RailKind::Ground => theme.ground_color.clone(),
            };
            ops.push(DrawOp::DrawStraightWire {
                from: jumper.from,
                to: jumper.to,
                color,
                width: config.wire.jumper_width,
            });
        }
    }

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Connection, Device, Pin, PinRole, Size, WireKind};
    use crate::layout::compute_layout;

    fn small_graph() -> BoardGraph {
        let controller = Device {
            id: "mcu".to_string(),
            label: "Controller".to_string(),
            footprint: Size::new(100.0, 60.0),
            pins: vec![Pin {
                name: "d0".to_string(),
                x: 10.0,
                y: 30.0,
                role: PinRole::Signal,
            }],
            needs_rail: false,
            integrated: false,
            asset: Some("mcu.png".to_string()),
        };
        let sensor = Device {
            id: "sensor".to_string(),
            label: "Sensor".to_string(),
            footprint: Size::new(30.0, 20.0),
            pins: vec![Pin {
                name: "out".to_string(),
                x: 30.0,
                y: 10.0,
                role: PinRole::Signal,
            }],
            needs_rail: false,
            integrated: false,
            asset: Some("sensor.png".to_string()),
        };
        let mut graph = BoardGraph::new(controller);
        graph.peripherals.push(sensor);
        graph.connections.push(Connection {
            provider: "sensor".to_string(),
            provider_pins: vec!["out".to_string()],
            consumer: "mcu".to_string(),
            consumer_pins: vec!["d0".to_string()],
            wire: WireKind::Single,
            roles: Vec::new(),
            colors: Vec::new(),
        });
        graph
    }

    #[test]
    fn canvas_op_comes_first() {
        let graph = small_graph();
        let theme = Theme::classic();
        let config = LayoutConfig::default();
        let layout = compute_layout(&graph, &theme, &config).unwrap();
        let ops = emit_draw_ops(&graph, &layout, &theme, &config).unwrap();
        assert!(matches!(ops[0], DrawOp::SetCanvasSize { .. }));
        assert!(
            ops.iter()
                .any(|op| matches!(op, DrawOp::PlaceImage { device, .. } if device == "mcu"))
        );
        assert!(ops.iter().any(|op| matches!(op, DrawOp::DrawCurve { .. })));
    }

    #[test]
    fn missing_asset_fails_the_pass() {
        let mut graph = small_graph();
        graph.peripherals[0].asset = None;
        let theme = Theme::classic();
        let config = LayoutConfig::default();
        let layout = compute_layout(&graph, &theme, &config).unwrap();
        let err = emit_draw_ops(&graph, &layout, &theme, &config).unwrap_err();
        assert!(matches!(err, LayoutError::MissingAsset { device } if device == "sensor"));
    }

    #[test]
    fn integrated_devices_are_not_drawn() {
        let mut graph = small_graph();
        graph.peripherals[0].integrated = true;
        let theme = Theme::classic();
        let config = LayoutConfig::default();
        let layout = compute_layout(&graph, &theme, &config).unwrap();
        let ops = emit_draw_ops(&graph, &layout, &theme, &config).unwrap();
        assert!(
            !ops.iter()
                .any(|op| matches!(op, DrawOp::PlaceImage { device, .. } if device == "sensor"))
        );
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::DrawCurve { .. })));
    }
}
