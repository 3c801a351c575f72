use std::collections::BTreeMap;

use serde::Serialize;

use crate::ir::Size;

use super::LayoutError;
use super::rail::RailKind;

/// Mutually exclusive placement bucket around the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Left,
    Right,
    TopMid,
    BottomMid,
    Controller,
    Rail,
}

impl Region {
    /// Side regions stack devices vertically; the mid regions stack
    /// them horizontally.
    pub fn stacks_vertically(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Device rotation, clockwise positive. Only quarter turns exist; any
/// other raw value is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rotation {
    Zero,
    Cw90,
    Ccw90,
    Half,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Self::Zero => 0,
            Self::Cw90 => 90,
            Self::Ccw90 => -90,
            Self::Half => 180,
        }
    }

    pub fn from_degrees(degrees: i32) -> Result<Self, LayoutError> {
        match degrees {
            0 => Ok(Self::Zero),
            90 => Ok(Self::Cw90),
            -90 | 270 => Ok(Self::Ccw90),
            180 | -180 => Ok(Self::Half),
            _ => Err(LayoutError::UnsupportedRotation { degrees }),
        }
    }

    /// Quarter turns swap footprint width and height.
    pub fn quarter_turn(self) -> bool {
        matches!(self, Self::Cw90 | Self::Ccw90)
    }
}

/// Edge of a device's own footprint that its connector pins face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnEdge {
    Left,
    Top,
    Bottom,
    Right,
}

/// Per-device layout state, filled progressively by the pipeline
/// stages. One record per placed device, fresh every pass.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceLayout {
    pub id: String,
    pub region: Region,
    pub rotation: Rotation,
    /// Footprint before rotation, kept for pin mapping.
    pub footprint: Size,
    /// Extents after rotation, used by sizing and placement.
    pub size: Size,
    /// Absolute centroid on the canvas.
    pub cx: f32,
    pub cy: f32,
    /// Anchor for the device label, when the region carries one.
    pub label_anchor: Option<(f32, f32)>,
}

/// A region's allotted band on the canvas.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RegionBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionBoxes {
    pub left: RegionBox,
    pub right: RegionBox,
    pub top: RegionBox,
    pub bottom: RegionBox,
    pub controller: RegionBox,
}

/// One routed wire: a cubic Bézier from a provider pin to a consumer
/// pin, already colored and weighted.
#[derive(Debug, Clone, Serialize)]
pub struct WireLayout {
    pub from: (f32, f32),
    pub c1: (f32, f32),
    pub c2: (f32, f32),
    pub to: (f32, f32),
    pub color: String,
    pub width: f32,
}

/// A straight jumper between a pin and its allocated rail slot.
#[derive(Debug, Clone, Serialize)]
pub struct RailJumper {
    pub device: String,
    pub pin: String,
    pub rail: RailKind,
    pub slot: u16,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

#[derive(Debug, Clone, Serialize)]
pub struct RailLayout {
    pub power_y: f32,
    pub ground_y: f32,
    pub jumpers: Vec<RailJumper>,
}

/// The finished layout of one pass: canvas size, region bands, one
/// `DeviceLayout` per placed device, routed wires, and the breadboard
/// rail assignments when the graph uses rails.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub devices: BTreeMap<String, DeviceLayout>,
    pub regions: RegionBoxes,
    pub wires: Vec<WireLayout>,
    pub rails: Option<RailLayout>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn device(&self, id: &str) -> Option<&DeviceLayout> {
        self.devices.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_round_trips_through_degrees() {
        for rotation in [Rotation::Zero, Rotation::Cw90, Rotation::Ccw90, Rotation::Half] {
            assert_eq!(Rotation::from_degrees(rotation.degrees()).unwrap(), rotation);
        }
    }

    #[test]
    fn raw_degrees_outside_the_set_are_rejected() {
        for degrees in [45, -45, 360, 1] {
            let err = Rotation::from_degrees(degrees).unwrap_err();
            assert!(matches!(err, LayoutError::UnsupportedRotation { degrees: d } if d == degrees));
        }
    }
}
