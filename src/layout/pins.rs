use crate::ir::Size;

use super::{DeviceLayout, Rotation};

/// Maps a pin's local footprint offset to canvas space, given the
/// device centroid, its un-rotated footprint, and the resolved
/// rotation. Pure in both directions.
pub(super) fn pin_to_canvas(
    centroid: (f32, f32),
    footprint: Size,
    local: (f32, f32),
    rotation: Rotation,
) -> (f32, f32) {
    let (cx, cy) = centroid;
    let (px, py) = local;
    let w = footprint.width;
    let h = footprint.height;
    match rotation {
        Rotation::Zero => (cx - w / 2.0 + px, cy - h / 2.0 + py),
        Rotation::Cw90 => (cx + h / 2.0 - py, cy - w / 2.0 + px),
        Rotation::Ccw90 => (cx - h / 2.0 + py, cy + w / 2.0 - px),
        Rotation::Half => (cx + w / 2.0 - px, cy + h / 2.0 - py),
    }
}

/// Inverse of `pin_to_canvas` for the same rotation.
pub(super) fn canvas_to_pin(
    centroid: (f32, f32),
    footprint: Size,
    canvas: (f32, f32),
    rotation: Rotation,
) -> (f32, f32) {
    let (cx, cy) = centroid;
    let (x, y) = canvas;
    let w = footprint.width;
    let h = footprint.height;
    match rotation {
        Rotation::Zero => (x - cx + w / 2.0, y - cy + h / 2.0),
        Rotation::Cw90 => (y - cy + w / 2.0, cx + h / 2.0 - x),
        Rotation::Ccw90 => (cy + w / 2.0 - y, x - cx + h / 2.0),
        Rotation::Half => (cx + w / 2.0 - x, cy + h / 2.0 - y),
    }
}

impl DeviceLayout {
    /// Canvas position of one of this device's pins.
    pub fn pin_position(&self, local: (f32, f32)) -> (f32, f32) {
        pin_to_canvas((self.cx, self.cy), self.footprint, local, self.rotation)
    }

    /// Inverse mapping, canvas space back to a local footprint offset.
    pub fn pin_local(&self, canvas: (f32, f32)) -> (f32, f32) {
        canvas_to_pin((self.cx, self.cy), self.footprint, canvas, self.rotation)
    }
}
