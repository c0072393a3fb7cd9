use serde::{Deserialize, Serialize};

use mapview_core::Color;

use crate::error::Result;

/// Output settings for a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub background: Color,
    pub anti_alias: bool,
    /// Share of the canvas the full extent occupies after zoom-to-extent.
    pub fit_margin: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::WHITE,
            anti_alias: false,
            fit_margin: 0.9, // 10% margin
        }
    }
}

impl RenderSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
