use serde::{Deserialize, Serialize};

use crate::core::Layer;
use crate::error::GeonaResult;

/// Defaults used when a layer carries no explicit color-band parameters and
/// for unmodified preview legends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleDefaults {
    pub num_color_bands: u32,
    pub above_max_color: String,
    pub below_min_color: String,
}

impl Default for ScaleDefaults {
    fn default() -> Self {
        Self {
            num_color_bands: 255,
            above_max_color: "extend".to_owned(),
            below_min_color: "extend".to_owned(),
        }
    }
}

/// Bootstrap configuration for a Geona visualization surface.
///
/// Serializable so host applications can persist/load viewer setup without
/// inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeonaConfig {
    pub extent_width: u32,
    #[serde(default)]
    pub scale_defaults: ScaleDefaults,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl GeonaConfig {
    #[must_use]
    pub fn new(extent_width: u32) -> Self {
        Self {
            extent_width,
            scale_defaults: ScaleDefaults::default(),
            layers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn from_json(json: &str) -> GeonaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> GeonaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
