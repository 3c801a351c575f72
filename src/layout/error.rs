use thiserror::Error;

use super::rail::RailKind;

/// Failures of a layout pass. All are fatal: no partial layout is
/// produced, and none are retried. The caller corrects the device or
/// connection configuration and triggers a fresh pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The region branch chain matched nothing, which indicates a
    /// malformed footprint or pin table (non-finite centroid).
    #[error("peripheral '{device}' has no classifiable region")]
    UnclassifiableRegion { device: String },

    /// A rotation outside {0, 90, -90, 180} degrees reached the engine.
    #[error("unsupported rotation of {degrees} degrees")]
    UnsupportedRotation { degrees: i32 },

    /// The bounded nearest-free search ran out of rail slots.
    #[error("no free {rail:?} rail slot left in the valid index range")]
    ExhaustedRailSlots { rail: RailKind },

    /// A device's visual asset could not be resolved at draw time.
    #[error("no drawable asset for device '{device}'")]
    MissingAsset { device: String },
}
