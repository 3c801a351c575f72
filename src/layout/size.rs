use crate::config::LayoutConfig;
use crate::ir::Size;

use super::{Region, RegionBox, RegionBoxes};

/// Bounding extents of one region, computed from its members' rotated
/// sizes plus the fixed margins, gaps, and label bands.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct RegionExtent {
    pub width: f32,
    pub height: f32,
    pub count: usize,
    /// Largest member extent across the stacking axis; devices are
    /// centered inside this band.
    pub device_band: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct RegionExtents {
    pub left: RegionExtent,
    pub right: RegionExtent,
    pub top: RegionExtent,
    pub bottom: RegionExtent,
}

impl RegionExtents {
    pub fn get(&self, region: Region) -> RegionExtent {
        match region {
            Region::Left => self.left,
            Region::Right => self.right,
            Region::TopMid => self.top,
            Region::BottomMid => self.bottom,
            Region::Controller | Region::Rail => RegionExtent::default(),
        }
    }
}

/// Region size from rotated member sizes. Side regions stack
/// vertically: width is the widest member plus the margin toward the
/// controller, height sums members with inter-device gaps and one
/// label band per device. Mid regions stack horizontally: height is
/// the tallest member plus the vertical margin and a single label
/// band, width sums members with gaps.
pub(super) fn accumulate_region(
    region: Region,
    sizes: &[Size],
    config: &LayoutConfig,
) -> RegionExtent {
    let count = sizes.len();
    if count == 0 {
        return RegionExtent::default();
    }
    let gaps = (count - 1) as f32 * config.device_gap;

    if region.stacks_vertically() {
        let max_width = sizes.iter().map(|s| s.width).fold(0.0f32, f32::max);
        let sum_height: f32 = sizes.iter().map(|s| s.height).sum();
        RegionExtent {
            width: max_width + config.horizontal_margin,
            height: sum_height + gaps + count as f32 * config.label_height,
            count,
            device_band: max_width,
        }
    } else {
        let max_height = sizes.iter().map(|s| s.height).fold(0.0f32, f32::max);
        let sum_width: f32 = sizes.iter().map(|s| s.width).sum();
        RegionExtent {
            width: sum_width + gaps,
            height: max_height + config.vertical_margin + config.label_height,
            count,
            device_band: max_height,
        }
    }
}

/// Combines the region extents into the overall canvas size and the
/// per-region bands. The middle column takes the widest of controller,
/// top, and bottom; the controller band sits vertically between the
/// two mid regions.
pub(super) fn solve_frame(
    extents: &RegionExtents,
    controller: Size,
) -> (RegionBoxes, f32, f32) {
    let middle_width = controller
        .width
        .max(extents.top.width)
        .max(extents.bottom.width);
    let total_width = extents.left.width + middle_width + extents.right.width;
    let stack_height = controller.height + extents.top.height + extents.bottom.height;
    let total_height = stack_height.max(extents.left.height).max(extents.right.height);

    let boxes = RegionBoxes {
        left: RegionBox {
            x: 0.0,
            y: 0.0,
            width: extents.left.width,
            height: total_height,
        },
        right: RegionBox {
            x: extents.left.width + middle_width,
            y: 0.0,
            width: extents.right.width,
            height: total_height,
        },
        top: RegionBox {
            x: extents.left.width,
            y: 0.0,
            width: middle_width,
            height: extents.top.height,
        },
        bottom: RegionBox {
            x: extents.left.width,
            y: extents.top.height + controller.height,
            width: middle_width,
            height: extents.bottom.height,
        },
        controller: RegionBox {
            x: extents.left.width,
            y: extents.top.height,
            width: middle_width,
            height: controller.height,
        },
    };
    (boxes, total_width, total_height)
}
