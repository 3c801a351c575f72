use serde::{Deserialize, Serialize};

/// Wire and label colors for the emitted diagram. Geometry lives in
/// `LayoutConfig`; everything here is presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub label_color: String,
    pub background: String,
    pub power_color: String,
    pub ground_color: String,
    pub signal_color: String,
    /// Palette cycled for generic signal wires on bus connectors.
    pub signal_palette: Vec<String>,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 12.0,
            label_color: "#333333".to_string(),
            background: "#FFFFFF".to_string(),
            power_color: "#CC0000".to_string(),
            ground_color: "#111111".to_string(),
            signal_color: "#1F6FBF".to_string(),
            signal_palette: vec![
                "#1F6FBF".to_string(),
                "#2E9E4F".to_string(),
                "#E8A013".to_string(),
                "#8C4FC4".to_string(),
                "#D9662B".to_string(),
                "#1CA3A3".to_string(),
            ],
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            label_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            power_color: "#E5484D".to_string(),
            ground_color: "#202425".to_string(),
            signal_color: "#3E63DD".to_string(),
            signal_palette: vec![
                "#3E63DD".to_string(),
                "#30A46C".to_string(),
                "#F5A623".to_string(),
                "#8E4EC6".to_string(),
                "#E5803B".to_string(),
                "#12A594".to_string(),
            ],
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
