mod coords;
mod error;
mod pins;
pub(crate) mod rail;
mod region;
mod rotation;
mod routing;
mod size;
pub(crate) mod types;

pub use error::LayoutError;
pub use rail::{RailKind, RailSlotAllocator};
pub use types::*;

use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::ir::{BoardGraph, Size};
use crate::theme::Theme;

use coords::assign_coordinates;
use rail::layout_rails;
use region::classify_region;
use rotation::resolve_rotation;
use size::{RegionExtents, accumulate_region, solve_frame};

/// Runs one full layout pass over an immutable graph snapshot:
/// region classification, rotation resolution, region sizing, canvas
/// solving, coordinate assignment, wire routing, and rail slot
/// allocation when the graph uses rails. Identical inputs produce
/// identical layouts; all state is local to the pass.
pub fn compute_layout(
    graph: &BoardGraph,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    let mut devices: BTreeMap<String, DeviceLayout> = BTreeMap::new();
    let mut placed_order: Vec<String> = Vec::new();
    let mut rail_order: Vec<String> = Vec::new();

    // Stage 1+2: bucket each peripheral and resolve its rotation.
    for device in &graph.peripherals {
        if device.integrated {
            continue;
        }
        let region = classify_region(graph, device)?;
        let rotation = resolve_rotation(graph, device, region);
        let state = DeviceLayout {
            id: device.id.clone(),
            region,
            rotation,
            footprint: device.footprint,
            size: device.footprint.rotated(rotation.quarter_turn()),
            cx: 0.0,
            cy: 0.0,
            label_anchor: None,
        };
        devices.insert(device.id.clone(), state);
        match region {
            Region::Rail => rail_order.push(device.id.clone()),
            _ => placed_order.push(device.id.clone()),
        }
    }

    devices.insert(
        graph.controller.id.clone(),
        DeviceLayout {
            id: graph.controller.id.clone(),
            region: Region::Controller,
            rotation: Rotation::Zero,
            footprint: graph.controller.footprint,
            size: graph.controller.footprint,
            cx: 0.0,
            cy: 0.0,
            label_anchor: None,
        },
    );

    // Stage 3+4: region extents and the solved canvas frame.
    let mut extents = RegionExtents::default();
    for region in [Region::Left, Region::Right, Region::TopMid, Region::BottomMid] {
        let sizes: Vec<Size> = placed_order
            .iter()
            .filter_map(|id| devices.get(id))
            .filter(|d| d.region == region)
            .map(|d| d.size)
            .collect();
        let extent = accumulate_region(region, &sizes, config);
        match region {
            Region::Left => extents.left = extent,
            Region::Right => extents.right = extent,
            Region::TopMid => extents.top = extent,
            Region::BottomMid => extents.bottom = extent,
            _ => {}
        }
    }
    let (boxes, frame_width, frame_height) = solve_frame(&extents, graph.controller.footprint);

    // Stage 5: absolute centroids.
    assign_coordinates(
        graph,
        &placed_order,
        &mut devices,
        &extents,
        &boxes,
        frame_height,
        config,
    );

    // Stage 8: breadboard band below the regions.
    let uses_rails = !rail_order.is_empty();
    let (width, height) = if uses_rails {
        let rail_right = slot_span_right(config);
        (
            frame_width.max(rail_right).max(config.min_canvas_width),
            (frame_height + config.rail.band_height).max(config.min_canvas_height),
        )
    } else {
        (
            frame_width.max(config.min_canvas_width),
            frame_height.max(config.min_canvas_height),
        )
    };

    let rails = if uses_rails {
        Some(layout_rails(
            graph,
            &rail_order,
            &mut devices,
            config,
            frame_height,
            height,
        )?)
    } else {
        None
    };

    // Stage 6+7: wire paths over the finished placement.
    let wires = routing::route_wires(graph, &devices, theme, config);

    Ok(Layout {
        devices,
        regions: boxes,
        wires,
        rails,
        width,
        height,
    })
}

/// Canvas x just past the last rail slot, so the rails always fit.
fn slot_span_right(config: &LayoutConfig) -> f32 {
    let rail = &config.rail;
    rail.origin_x + (rail.max_index as f32 + 1.0) * rail.pitch
}
