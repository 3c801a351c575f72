use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Stroke widths per wire class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireConfig {
    pub single_width: f32,
    pub ribbon_width: f32,
    pub bus_width: f32,
    pub jumper_width: f32,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            single_width: 2.4,
            ribbon_width: 1.8,
            bus_width: 3.0,
            jumper_width: 2.4,
        }
    }
}

/// Breadboard rail geometry and slot allocator bounds. Slot index i
/// sits at canvas x = origin_x + i * pitch; rails run along the bottom
/// of the canvas inside the breadboard band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RailConfig {
    pub origin_x: f32,
    pub pitch: f32,
    /// Lowest valid slot index. Index 0 is never allocated.
    pub min_index: u16,
    pub max_index: u16,
    /// Indices pre-seeded as used on both rails.
    pub reserved: Vec<u16>,
    /// Extra canvas height added below the regions when rails are in use.
    pub band_height: f32,
    /// Rail device row, measured from the top of the breadboard band.
    pub device_row_offset: f32,
    /// Rail line positions, measured up from the canvas bottom.
    pub power_rail_offset: f32,
    pub ground_rail_offset: f32,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            origin_x: 40.0,
            pitch: 12.0,
            min_index: 1,
            max_index: 50,
            reserved: vec![1, 2],
            band_height: 150.0,
            device_row_offset: 30.0,
            power_rail_offset: 22.0,
            ground_rail_offset: 44.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gap between a side region's devices and the controller column.
    pub horizontal_margin: f32,
    /// Gap between a top/bottom region's devices and the controller.
    pub vertical_margin: f32,
    /// Gap between adjacent devices inside one region.
    pub device_gap: f32,
    /// Vertical space reserved for one device label.
    pub label_height: f32,
    pub min_canvas_width: f32,
    pub min_canvas_height: f32,
    pub wire: WireConfig,
    pub rail: RailConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_margin: 80.0,
            vertical_margin: 80.0,
            device_gap: 30.0,
            label_height: 20.0,
            min_canvas_width: 200.0,
            min_canvas_height: 200.0,
            wire: WireConfig::default(),
            rail: RailConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    label_color: Option<String>,
    background: Option<String>,
    power_color: Option<String>,
    ground_color: Option<String>,
    signal_color: Option<String>,
    signal_palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOverrides {
    horizontal_margin: Option<f32>,
    vertical_margin: Option<f32>,
    device_gap: Option<f32>,
    label_height: Option<f32>,
    wire: Option<WireConfig>,
    rail: Option<RailConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutOverrides>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    // json5 accepts plain JSON as well as the relaxed form.
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.power_color {
            config.theme.power_color = v;
        }
        if let Some(v) = vars.ground_color {
            config.theme.ground_color = v;
        }
        if let Some(v) = vars.signal_color {
            config.theme.signal_color = v;
        }
        if let Some(v) = vars.signal_palette
            && !v.is_empty()
        {
            config.theme.signal_palette = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.horizontal_margin {
            config.layout.horizontal_margin = v;
        }
        if let Some(v) = layout.vertical_margin {
            config.layout.vertical_margin = v;
        }
        if let Some(v) = layout.device_gap {
            config.layout.device_gap = v;
        }
        if let Some(v) = layout.label_height {
            config.layout.label_height = v;
        }
        if let Some(v) = layout.wire {
            config.layout.wire = v;
        }
        if let Some(v) = layout.rail {
            config.layout.rail = v;
        }
    }

    Ok(config)
}
