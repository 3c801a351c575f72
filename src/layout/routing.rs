use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::ir::{BoardGraph, Connection, PinRole, WireKind};
use crate::theme::Theme;

use super::{DeviceLayout, Region, WireLayout};

/// Control-point interpolation ratios for the wire Bézier, keyed by
/// the consumer's region. Side regions get a vertical S-curve, the mid
/// regions a horizontal one. Kept as data so the table is testable on
/// its own.
const SIDE_RATIOS: [(f32, f32); 2] = [(0.5, 0.0), (0.5, 1.0)];
const MID_RATIOS: [(f32, f32); 2] = [(0.0, 0.35), (1.0, 0.65)];

pub(super) fn bezier_ratios(region: Region) -> [(f32, f32); 2] {
    match region {
        Region::TopMid | Region::BottomMid => MID_RATIOS,
        // Controller and rail endpoints curve like the side regions.
        Region::Left | Region::Right | Region::Controller | Region::Rail => SIDE_RATIOS,
    }
}

fn lerp(from: (f32, f32), to: (f32, f32), ratio: (f32, f32)) -> (f32, f32) {
    (
        from.0 + ratio.0 * (to.0 - from.0),
        from.1 + ratio.1 * (to.1 - from.1),
    )
}

fn stroke_width(config: &LayoutConfig, wire: WireKind) -> f32 {
    match wire {
        WireKind::Single => config.wire.single_width,
        WireKind::Ribbon => config.wire.ribbon_width,
        WireKind::Bus => config.wire.bus_width,
    }
}

/// Role of the wire at pair index `i`: the connection's per-index tag
/// wins, then either endpoint pin that declares power or ground.
fn effective_role(connection: &Connection, provider: Option<PinRole>, consumer: Option<PinRole>, index: usize) -> PinRole {
    if let Some(Some(role)) = connection.roles.get(index) {
        return *role;
    }
    for role in [provider, consumer].into_iter().flatten() {
        if role.is_power() || role.is_ground() {
            return role;
        }
    }
    provider.or(consumer).unwrap_or(PinRole::Signal)
}

/// Builds the curved wire paths for every matched pin pair. The
/// palette counter is reset per connection and advances one step per
/// generic (non-power/ground) wire, so identical graphs always color
/// identically.
pub(super) fn route_wires(
    graph: &BoardGraph,
    devices: &BTreeMap<String, DeviceLayout>,
    theme: &Theme,
    config: &LayoutConfig,
) -> Vec<WireLayout> {
    let mut wires = Vec::new();

    for connection in &graph.connections {
        let Some(provider_device) = graph.device(&connection.provider) else {
            continue;
        };
        let Some(consumer_device) = graph.device(&connection.consumer) else {
            continue;
        };
        // Integrated endpoints have no layout state and draw no wires.
        let Some(provider_layout) = devices.get(&connection.provider) else {
            continue;
        };
        let Some(consumer_layout) = devices.get(&connection.consumer) else {
            continue;
        };

        let ratios = bezier_ratios(consumer_layout.region);
        let width = stroke_width(config, connection.wire);
        let mut palette_step = 0usize;

        for index in 0..connection.pair_count() {
            let provider_pin = provider_device.pin(&connection.provider_pins[index]);
            let consumer_pin = consumer_device.pin(&connection.consumer_pins[index]);
            let (Some(provider_pin), Some(consumer_pin)) = (provider_pin, consumer_pin) else {
                continue;
            };

            let from = provider_layout.pin_position((provider_pin.x, provider_pin.y));
            let to = consumer_layout.pin_position((consumer_pin.x, consumer_pin.y));

            let role = effective_role(
                connection,
                Some(provider_pin.role),
                Some(consumer_pin.role),
                index,
            );
            let color = if role.is_ground() {
                theme.ground_color.clone()
            } else if role.is_power() {
                theme.power_color.clone()
            } else {
                let explicit = connection
                    .colors
                    .get(index)
                    .and_then(|color| color.clone());
                let picked = explicit.unwrap_or_else(|| {
                    if connection.wire == WireKind::Bus {
                        let palette = &theme.signal_palette;
                        palette[palette_step % palette.len()].clone()
                    } else {
                        theme.signal_color.clone()
                    }
                });
                palette_step += 1;
                picked
            };

            wires.push(WireLayout {
                from,
                c1: lerp(from, to, ratios[0]),
                c2: lerp(from, to, ratios[1]),
                to,
                color,
                width,
            });
        }
    }

    wires
}
