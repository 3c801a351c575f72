use serde::{Deserialize, Serialize};

/// Functional role of a pin within its device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinRole {
    Power,
    Ground,
    Signal,
    Sda,
    Scl,
}

impl PinRole {
    pub fn is_power(self) -> bool {
        matches!(self, Self::Power)
    }

    pub fn is_ground(self) -> bool {
        matches!(self, Self::Ground)
    }
}

/// A named electrical contact at a fixed local offset within a device
/// footprint. Offsets are in layout units from the footprint's top-left
/// corner, before any rotation is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub role: PinRole,
}

/// Physical bounding rectangle of a device as drawn, in layout units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Footprint extents after a quarter-turn swap width and height.
    pub fn rotated(self, quarter_turn: bool) -> Self {
        if quarter_turn {
            Self {
                width: self.height,
                height: self.width,
            }
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub footprint: Size,
    #[serde(default)]
    pub pins: Vec<Pin>,
    /// Breadboard devices draw their power and ground from shared rails
    /// instead of occupying a placement region.
    #[serde(default)]
    pub needs_rail: bool,
    /// Integrated (on-board / virtual) devices are excluded from
    /// placement and drawing entirely.
    #[serde(default)]
    pub integrated: bool,
    /// Renderer asset name; resolution happens at draw time.
    #[serde(default)]
    pub asset: Option<String>,
}

impl Device {
    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.name == name)
    }
}

/// Wire class of a connection; selects stroke width and how generic
/// signal wires pick their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireKind {
    Single,
    Ribbon,
    Bus,
}

impl Default for WireKind {
    fn default() -> Self {
        Self::Single
    }
}

/// An ordered pairing of provider pins on one device to consumer pins
/// on another. Pins are matched by index; the pairing length is the
/// shorter of the two lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub provider: String,
    pub provider_pins: Vec<String>,
    pub consumer: String,
    pub consumer_pins: Vec<String>,
    #[serde(default)]
    pub wire: WireKind,
    /// Per-index role overrides; falls back to the pin's own role.
    #[serde(default)]
    pub roles: Vec<Option<PinRole>>,
    /// Explicit per-index colors declared by the connector type. When
    /// present for an index, they win over palette cycling.
    #[serde(default)]
    pub colors: Vec<Option<String>>,
}

impl Connection {
    pub fn pair_count(&self) -> usize {
        self.provider_pins.len().min(self.consumer_pins.len())
    }
}

/// Immutable snapshot of the connection graph consumed by one layout
/// pass. Exactly one controller by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardGraph {
    pub controller: Device,
    #[serde(default)]
    pub peripherals: Vec<Device>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl BoardGraph {
    pub fn new(controller: Device) -> Self {
        Self {
            controller,
            peripherals: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        if self.controller.id == id {
            return Some(&self.controller);
        }
        self.peripherals.iter().find(|device| device.id == id)
    }

    /// True when any peripheral draws from the shared rails, which
    /// activates the breadboard band and the rail slot allocator.
    pub fn uses_rails(&self) -> bool {
        self.peripherals
            .iter()
            .any(|device| device.needs_rail && !device.integrated)
    }
}
