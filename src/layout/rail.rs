use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::config::{LayoutConfig, RailConfig};
use crate::ir::{BoardGraph, PinRole};

use super::{DeviceLayout, LayoutError, RailJumper, RailLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RailKind {
    Power,
    Ground,
}

/// Discrete-slot allocator for the shared power and ground rails. One
/// allocator is constructed per layout pass and passed explicitly to
/// the steps that consume it; the used sets never outlive the pass.
#[derive(Debug)]
pub struct RailSlotAllocator {
    min_index: u16,
    max_index: u16,
    power_used: BTreeSet<u16>,
    ground_used: BTreeSet<u16>,
}

impl RailSlotAllocator {
    pub fn new(config: &RailConfig) -> Self {
        let reserved: BTreeSet<u16> = config.reserved.iter().copied().collect();
        Self {
            min_index: config.min_index,
            max_index: config.max_index,
            power_used: reserved.clone(),
            ground_used: reserved,
        }
    }

    fn used_mut(&mut self, rail: RailKind) -> &mut BTreeSet<u16> {
        match rail {
            RailKind::Power => &mut self.power_used,
            RailKind::Ground => &mut self.ground_used,
        }
    }

    /// First free index scanning upward from the lower bound. Used for
    /// the single controller-to-rail jumper per rail.
    pub fn next_free(&mut self, rail: RailKind) -> Result<u16, LayoutError> {
        let (min, max) = (self.min_index, self.max_index);
        let used = self.used_mut(rail);
        for index in min..=max {
            if !used.contains(&index) {
                used.insert(index);
                return Ok(index);
            }
        }
        Err(LayoutError::ExhaustedRailSlots { rail })
    }

    /// Nearest free index to `estimate`, expanding outward
    /// symmetrically (e-1, e+1, e-2, e+2, ...) within the valid range.
    pub fn nearest_free(&mut self, rail: RailKind, estimate: u16) -> Result<u16, LayoutError> {
        let (min, max) = (self.min_index, self.max_index);
        let estimate = estimate.clamp(min, max);
        let used = self.used_mut(rail);
        if !used.contains(&estimate) {
            used.insert(estimate);
            return Ok(estimate);
        }
        let mut step = 1u16;
        loop {
            let below = estimate.checked_sub(step).filter(|i| *i >= min);
            let above = estimate.checked_add(step).filter(|i| *i <= max);
            if below.is_none() && above.is_none() {
                return Err(LayoutError::ExhaustedRailSlots { rail });
            }
            if let Some(index) = below
                && !used.contains(&index)
            {
                used.insert(index);
                return Ok(index);
            }
            if let Some(index) = above
                && !used.contains(&index)
            {
                used.insert(index);
                return Ok(index);
            }
            step += 1;
        }
    }
}

/// Canvas x of a rail slot.
pub(super) fn slot_x(config: &RailConfig, index: u16) -> f32 {
    config.origin_x + index as f32 * config.pitch
}

/// Slot estimate for a pin at canvas x.
pub(super) fn estimate_for_x(config: &RailConfig, x: f32) -> u16 {
    let raw = ((x - config.origin_x) / config.pitch).round();
    if raw <= 0.0 {
        config.min_index
    } else if raw >= config.max_index as f32 {
        config.max_index
    } else {
        raw as u16
    }
}

/// Places the rail-bucket devices on the breadboard band and allocates
/// their rail slots plus the controller jumpers. `rail_order` is the
/// rail devices in input order; `band_top` is where the breadboard
/// band begins; `total_height` the final canvas height.
pub(super) fn layout_rails(
    graph: &BoardGraph,
    rail_order: &[String],
    devices: &mut BTreeMap<String, DeviceLayout>,
    config: &LayoutConfig,
    band_top: f32,
    total_height: f32,
) -> Result<RailLayout, LayoutError> {
    let rail = &config.rail;
    let power_y = total_height - rail.power_rail_offset;
    let ground_y = total_height - rail.ground_rail_offset;
    let row_top = band_top + rail.device_row_offset;

    // Row placement, input order, walking right from the rail origin.
    let mut cursor = rail.origin_x;
    for id in rail_order {
        let device = devices.get_mut(id).expect("rail member has layout state");
        device.cx = cursor + device.size.width / 2.0;
        device.cy = row_top + device.size.height / 2.0;
        device.label_anchor = Some((
            device.cx,
            row_top + device.size.height + config.label_height / 2.0,
        ));
        cursor += device.size.width + config.device_gap;
    }

    let mut allocator = RailSlotAllocator::new(rail);
    let mut jumpers = Vec::new();

    // One controller jumper per rail, allocated in next-free mode.
    for (kind, rail_y, role) in [
        (RailKind::Power, power_y, PinRole::Power),
        (RailKind::Ground, ground_y, PinRole::Ground),
    ] {
        let Some(pin) = graph.controller.pins.iter().find(|pin| pin.role == role) else {
            continue;
        };
        let Some(layout) = devices.get(&graph.controller.id) else {
            continue;
        };
        let slot = allocator.next_free(kind)?;
        jumpers.push(RailJumper {
            device: graph.controller.id.clone(),
            pin: pin.name.clone(),
            rail: kind,
            slot,
            from: layout.pin_position((pin.x, pin.y)),
            to: (slot_x(rail, slot), rail_y),
        });
    }

    // Each rail device's power and ground pins land on the nearest
    // free slot to their own canvas x.
    for id in rail_order {
        let Some(device) = graph.device(id) else {
            continue;
        };
        let layout = devices.get(id).expect("rail member has layout state");
        for pin in &device.pins {
            let (kind, rail_y) = match pin.role {
                PinRole::Power => (RailKind::Power, power_y),
                PinRole::Ground => (RailKind::Ground, ground_y),
                _ => continue,
            };
            let position = layout.pin_position((pin.x, pin.y));
            let estimate = estimate_for_x(rail, position.0);
            let slot = allocator.nearest_free(kind, estimate)?;
            jumpers.push(RailJumper {
                device: id.clone(),
                pin: pin.name.clone(),
                rail: kind,
                slot,
                from: position,
                to: (slot_x(rail, slot), rail_y),
            });
        }
    }

    Ok(RailLayout {
        power_y,
        ground_y,
        jumpers,
    })
}
