use crate::ir::{BoardGraph, Device};

use super::{LayoutError, Region};

/// Fractions of the controller footprint that split off the side
/// regions and the top/bottom halves.
const SIDE_FRACTION: f32 = 0.2;
const VERTICAL_SPLIT: f32 = 0.5;

/// Centroid of the controller-side pins feeding `peripheral`, in the
/// controller's local footprint coordinates. A peripheral wired to no
/// controller pin gets `(0, 0)`, which the classifier resolves to
/// Left (kept as observed behavior, see DESIGN.md).
pub(super) fn controller_side_centroid(graph: &BoardGraph, peripheral: &str) -> (f32, f32) {
    let controller = &graph.controller;
    let mut sum = (0.0f32, 0.0f32);
    let mut count = 0usize;

    for connection in &graph.connections {
        let controller_pins = if connection.provider == controller.id
            && connection.consumer == peripheral
        {
            &connection.provider_pins
        } else if connection.consumer == controller.id && connection.provider == peripheral {
            &connection.consumer_pins
        } else {
            continue;
        };

        for name in controller_pins.iter().take(connection.pair_count()) {
            if let Some(pin) = controller.pin(name) {
                sum.0 += pin.x;
                sum.1 += pin.y;
                count += 1;
            }
        }
    }

    if count == 0 {
        (0.0, 0.0)
    } else {
        (sum.0 / count as f32, sum.1 / count as f32)
    }
}

/// Buckets one peripheral relative to the controller footprint. Rail
/// devices bypass the directional classification entirely.
pub(super) fn classify_region(graph: &BoardGraph, device: &Device) -> Result<Region, LayoutError> {
    if device.needs_rail {
        return Ok(Region::Rail);
    }

    let (cx, cy) = controller_side_centroid(graph, &device.id);
    // Compare as footprint fractions so a centroid sitting exactly on
    // a boundary classifies the same regardless of footprint scale.
    let fx = cx / graph.controller.footprint.width;
    let fy = cy / graph.controller.footprint.height;
    if !fx.is_finite() || !fy.is_finite() {
        return Err(LayoutError::UnclassifiableRegion {
            device: device.id.clone(),
        });
    }

    let region = if fx < SIDE_FRACTION {
        Region::Left
    } else if fx > 1.0 - SIDE_FRACTION {
        Region::Right
    } else if fy > VERTICAL_SPLIT {
        Region::BottomMid
    } else {
        Region::TopMid
    };
    Ok(region)
}
