use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Protocol the layer's server speaks.
///
/// WMTS-backed layers start with an empty style map; styles are filled in
/// later by capability-document parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayerProtocol {
    #[default]
    Wms,
    Wmts,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

/// Server-declared base URL plus dimensions for a pre-rendered legend image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendTemplate {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    pub id: String,
    #[serde(default)]
    pub legend: Option<LegendTemplate>,
    #[serde(default = "default_colorbar_only")]
    pub colorbar_only: bool,
}

fn default_colorbar_only() -> bool {
    true
}

impl LayerStyle {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            legend: None,
            colorbar_only: true,
        }
    }

    #[must_use]
    pub fn with_legend(mut self, base_url: impl Into<String>, width: u32, height: u32) -> Self {
        self.legend = Some(LegendTemplate {
            base_url: base_url.into(),
            width,
            height,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerServer {
    pub base_url: String,
    #[serde(default)]
    pub protocol: LayerProtocol,
}

/// Map layer metadata as supplied by server capability documents.
///
/// Pure data: construction accepts whatever fields the configuration
/// carries. Scale-bound invariants are enforced by `validate_scale` on the
/// edit path, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub title: String,
    pub server: LayerServer,
    #[serde(default)]
    pub first_time: Option<f64>,
    #[serde(default)]
    pub last_time: Option<f64>,
    /// Discrete valid time instants, unix seconds, populated by capability
    /// parsing. Empty means "snap by clamping into [first_time, last_time]".
    #[serde(default)]
    pub times: Vec<f64>,
    #[serde(default)]
    pub scale_min: Option<f64>,
    #[serde(default)]
    pub scale_max: Option<f64>,
    #[serde(default)]
    pub scale_min_default: Option<f64>,
    #[serde(default)]
    pub scale_max_default: Option<f64>,
    #[serde(default)]
    pub logarithmic: bool,
    #[serde(default)]
    styles: IndexMap<String, LayerStyle>,
    #[serde(default)]
    pub active_style: Option<String>,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub projections: Vec<String>,
}

impl Layer {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, server: LayerServer) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            server,
            first_time: None,
            last_time: None,
            times: Vec::new(),
            scale_min: None,
            scale_max: None,
            scale_min_default: None,
            scale_max_default: None,
            logarithmic: false,
            styles: IndexMap::new(),
            active_style: None,
            bounding_box: None,
            projections: Vec::new(),
        }
    }

    /// Adds a style; duplicate ids keep the first definition.
    pub fn insert_style(&mut self, style: LayerStyle) {
        self.styles.entry(style.id.clone()).or_insert(style);
    }

    #[must_use]
    pub fn style(&self, id: &str) -> Option<&LayerStyle> {
        self.styles.get(id)
    }

    #[must_use]
    pub fn styles(&self) -> &IndexMap<String, LayerStyle> {
        &self.styles
    }

    /// Style currently in effect: the explicitly selected one, otherwise the
    /// first declared style.
    #[must_use]
    pub fn current_style(&self) -> Option<&LayerStyle> {
        match &self.active_style {
            Some(id) => self.styles.get(id),
            None => self.styles.values().next(),
        }
    }

    /// Style used for unmodified preview swatches: always the first declared.
    #[must_use]
    pub fn default_style(&self) -> Option<&LayerStyle> {
        self.styles.values().next()
    }

    #[must_use]
    pub fn has_temporal_range(&self) -> bool {
        self.first_time.is_some() && self.last_time.is_some()
    }
}
