use crate::ir::{BoardGraph, Device};

use super::{OwnEdge, Region, Rotation};

/// Rotation for each (region, own connector edge) pair, clockwise
/// positive, chosen so the connector edge ends up facing the
/// controller. Rows follow `region_index`, columns `edge_index`.
const ROTATION_TABLE: [[Rotation; 4]; 4] = [
    // Left region:        edge Left      Top           Bottom         Right
    [Rotation::Half, Rotation::Cw90, Rotation::Ccw90, Rotation::Zero],
    // Right region
    [Rotation::Zero, Rotation::Ccw90, Rotation::Cw90, Rotation::Half],
    // TopMid region
    [Rotation::Ccw90, Rotation::Half, Rotation::Zero, Rotation::Cw90],
    // BottomMid region
    [Rotation::Cw90, Rotation::Zero, Rotation::Half, Rotation::Ccw90],
];

fn region_index(region: Region) -> Option<usize> {
    match region {
        Region::Left => Some(0),
        Region::Right => Some(1),
        Region::TopMid => Some(2),
        Region::BottomMid => Some(3),
        Region::Controller | Region::Rail => None,
    }
}

fn edge_index(edge: OwnEdge) -> usize {
    match edge {
        OwnEdge::Left => 0,
        OwnEdge::Top => 1,
        OwnEdge::Bottom => 2,
        OwnEdge::Right => 3,
    }
}

/// Table lookup, exposed for the exactness test.
pub(super) fn rotation_for(region: Region, edge: OwnEdge) -> Rotation {
    match region_index(region) {
        Some(row) => ROTATION_TABLE[row][edge_index(edge)],
        // Controller and rail devices are never rotated.
        None => Rotation::Zero,
    }
}

/// Centroid of the device's own connection pins, relative to its
/// footprint center. Devices appearing in no connection sit at the
/// center, which classifies as the Right edge.
fn own_pin_centroid(graph: &BoardGraph, device: &Device) -> (f32, f32) {
    let mut sum = (0.0f32, 0.0f32);
    let mut count = 0usize;

    for connection in &graph.connections {
        let own_pins = if connection.provider == device.id {
            &connection.provider_pins
        } else if connection.consumer == device.id {
            &connection.consumer_pins
        } else {
            continue;
        };
        for name in own_pins.iter().take(connection.pair_count()) {
            if let Some(pin) = device.pin(name) {
                sum.0 += pin.x;
                sum.1 += pin.y;
                count += 1;
            }
        }
    }

    if count == 0 {
        return (0.0, 0.0);
    }
    let cx = sum.0 / count as f32;
    let cy = sum.1 / count as f32;
    (
        cx - device.footprint.width / 2.0,
        cy - device.footprint.height / 2.0,
    )
}

/// Classifies which footprint edge the connector pins face, using the
/// angles to the four footprint corners as sector boundaries. Unlike a
/// plain quadrant test this stays correct for non-square footprints: a
/// pin near the middle of the long edge classifies onto that edge even
/// when its offset along the short axis is smaller.
pub(super) fn connector_edge(graph: &BoardGraph, device: &Device) -> OwnEdge {
    let (dx, dy) = own_pin_centroid(graph, device);
    let angle = dy.atan2(dx);
    // Angle from the center to the bottom-right corner; the other
    // corner angles follow by symmetry.
    let corner = device.footprint.height.atan2(device.footprint.width);
    let pi = std::f32::consts::PI;

    if angle > -corner && angle <= corner {
        OwnEdge::Right
    } else if angle > corner && angle <= pi - corner {
        OwnEdge::Bottom
    } else if angle > -(pi - corner) && angle <= -corner {
        OwnEdge::Top
    } else {
        OwnEdge::Left
    }
}

pub(super) fn resolve_rotation(graph: &BoardGraph, device: &Device, region: Region) -> Rotation {
    if matches!(region, Region::Rail | Region::Controller) {
        return Rotation::Zero;
    }
    rotation_for(region, connector_edge(graph, device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Connection, Pin, PinRole, Size, WireKind};

    #[test]
    fn rotation_table_exact() {
        let expected: [(Region, OwnEdge, i32); 16] = [
            (Region::Left, OwnEdge::Left, 180),
            (Region::Left, OwnEdge::Top, 90),
            (Region::Left, OwnEdge::Bottom, -90),
            (Region::Left, OwnEdge::Right, 0),
            (Region::Right, OwnEdge::Left, 0),
            (Region::Right, OwnEdge::Top, -90),
            (Region::Right, OwnEdge::Bottom, 90),
            (Region::Right, OwnEdge::Right, 180),
            (Region::TopMid, OwnEdge::Left, -90),
            (Region::TopMid, OwnEdge::Top, 180),
            (Region::TopMid, OwnEdge::Bottom, 0),
            (Region::TopMid, OwnEdge::Right, 90),
            (Region::BottomMid, OwnEdge::Left, 90),
            (Region::BottomMid, OwnEdge::Top, 0),
            (Region::BottomMid, OwnEdge::Bottom, 180),
            (Region::BottomMid, OwnEdge::Right, -90),
        ];
        for (region, edge, degrees) in expected {
            assert_eq!(
                rotation_for(region, edge).degrees(),
                degrees,
                "region {region:?}, edge {edge:?}"
            );
        }
    }

    fn device_with_pin(footprint: Size, x: f32, y: f32) -> Device {
        Device {
            id: "dev".to_string(),
            label: String::new(),
            footprint,
            pins: vec![Pin {
                name: "p".to_string(),
                x,
                y,
                role: PinRole::Signal,
            }],
            needs_rail: false,
            integrated: false,
            asset: None,
        }
    }

    fn graph_for(device: Device) -> BoardGraph {
        let controller = Device {
            id: "mcu".to_string(),
            label: String::new(),
            footprint: Size::new(100.0, 60.0),
            pins: vec![Pin {
                name: "d0".to_string(),
                x: 0.0,
                y: 0.0,
                role: PinRole::Signal,
            }],
            needs_rail: false,
            integrated: false,
            asset: None,
        };
        let mut graph = BoardGraph::new(controller);
        graph.connections.push(Connection {
            provider: device.id.clone(),
            provider_pins: vec!["p".to_string()],
            consumer: "mcu".to_string(),
            consumer_pins: vec!["d0".to_string()],
            wire: WireKind::Single,
            roles: Vec::new(),
            colors: Vec::new(),
        });
        graph.peripherals.push(device);
        graph
    }

    #[test]
    fn square_footprint_cardinal_edges() {
        let footprint = Size::new(40.0, 40.0);
        let cases = [
            (20.0, 1.0, OwnEdge::Top),
            (20.0, 39.0, OwnEdge::Bottom),
            (1.0, 20.0, OwnEdge::Left),
            (39.0, 20.0, OwnEdge::Right),
        ];
        for (x, y, expected) in cases {
            let graph = graph_for(device_with_pin(footprint, x, y));
            assert_eq!(connector_edge(&graph, &graph.peripherals[0]), expected);
        }
    }

    #[test]
    fn wide_footprint_prefers_long_edge() {
        // Pin at (80, 19) of a 100x20 footprint: offset (30, 9) from
        // center. A 45-degree quadrant test would call this Right; the
        // corner-sector test correctly lands on the bottom edge.
        let graph = graph_for(device_with_pin(Size::new(100.0, 20.0), 80.0, 19.0));
        assert_eq!(connector_edge(&graph, &graph.peripherals[0]), OwnEdge::Bottom);
    }

    #[test]
    fn tall_footprint_prefers_long_edge() {
        let graph = graph_for(device_with_pin(Size::new(20.0, 100.0), 19.0, 80.0));
        assert_eq!(connector_edge(&graph, &graph.peripherals[0]), OwnEdge::Right);
    }

    #[test]
    fn rail_devices_never_rotate() {
        let graph = graph_for(device_with_pin(Size::new(40.0, 40.0), 20.0, 1.0));
        let rotation = resolve_rotation(&graph, &graph.peripherals[0], Region::Rail);
        assert_eq!(rotation, Rotation::Zero);
    }
}
