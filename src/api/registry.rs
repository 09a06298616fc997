use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::config::{GeonaConfig, ScaleDefaults};
use crate::api::events::{EventDispatcher, GeonaEvent};
use crate::core::timebar::{DragOutcome, Timebar, TimebarToken};
use crate::core::types::{Extent, TimeMarker};
use crate::core::{Layer, ScaleRange, ValidatedScale};
use crate::error::{GeonaError, GeonaResult};

/// Current rendering parameters for one layer's tile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceParams {
    #[serde(default)]
    pub style: Option<String>,
    pub num_color_bands: u32,
    pub above_max_color: String,
    pub below_min_color: String,
}

impl SourceParams {
    #[must_use]
    pub fn from_defaults(defaults: &ScaleDefaults) -> Self {
        Self {
            style: None,
            num_color_bands: defaults.num_color_bands,
            above_max_color: defaults.above_max_color.clone(),
            below_min_color: defaults.below_min_color.clone(),
        }
    }
}

/// Single owner of the available-layer set and all layer mutation.
///
/// Panels never edit a `Layer` directly; they submit scale changes here and
/// the registry applies them and notifies subscribers. Registries are also
/// the source of the one timebar slot per map.
#[derive(Debug)]
pub struct LayerRegistry {
    layers: IndexMap<String, Layer>,
    source_params: IndexMap<String, SourceParams>,
    defaults: ScaleDefaults,
    pending: IndexMap<String, ScaleRange>,
    dispatcher: EventDispatcher,
    timebar_minted: bool,
}

impl LayerRegistry {
    #[must_use]
    pub fn new(defaults: ScaleDefaults) -> Self {
        Self {
            layers: IndexMap::new(),
            source_params: IndexMap::new(),
            defaults,
            pending: IndexMap::new(),
            dispatcher: EventDispatcher::new(),
            timebar_minted: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &GeonaConfig) -> Self {
        let mut registry = Self::new(config.scale_defaults.clone());
        for layer in &config.layers {
            registry.insert_layer(layer.clone());
        }
        registry
    }

    pub fn insert_layer(&mut self, layer: Layer) {
        let mut params = SourceParams::from_defaults(&self.defaults);
        params.style = layer.current_style().map(|style| style.id.clone());
        self.source_params.insert(layer.id.clone(), params);
        self.layers.insert(layer.id.clone(), layer);
    }

    /// Removes a layer and everything queued against it.
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Layer> {
        self.source_params.shift_remove(layer_id);
        self.pending.shift_remove(layer_id);
        self.layers.shift_remove(layer_id)
    }

    pub fn layer(&self, layer_id: &str) -> GeonaResult<&Layer> {
        self.layers
            .get(layer_id)
            .ok_or_else(|| GeonaError::UnknownLayer(layer_id.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    pub fn layer_ids(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn defaults(&self) -> &ScaleDefaults {
        &self.defaults
    }

    pub fn source_params(&self, layer_id: &str) -> GeonaResult<&SourceParams> {
        self.source_params
            .get(layer_id)
            .ok_or_else(|| GeonaError::UnknownLayer(layer_id.to_owned()))
    }

    /// Applies new rendering parameters to a layer's tile source.
    pub fn update_source_params(
        &mut self,
        layer_id: &str,
        params: SourceParams,
    ) -> GeonaResult<()> {
        let layer = self
            .layers
            .get_mut(layer_id)
            .ok_or_else(|| GeonaError::UnknownLayer(layer_id.to_owned()))?;
        layer.active_style = params.style.clone();
        self.source_params.insert(layer_id.to_owned(), params);
        Ok(())
    }

    /// Submits a validated scale change.
    ///
    /// `force` applies it immediately; otherwise it is queued, and a later
    /// submission for the same layer supersedes the queued one. Returns the
    /// validation warning, if any, for the caller to surface.
    pub fn submit_scale_change(
        &mut self,
        layer_id: &str,
        validated: ValidatedScale,
        force: bool,
    ) -> GeonaResult<Option<String>> {
        if !self.contains(layer_id) {
            return Err(GeonaError::UnknownLayer(layer_id.to_owned()));
        }

        if force {
            self.apply_scale(layer_id, validated.range)?;
        } else {
            debug!(layer_id, "queueing scale change");
            self.pending.insert(layer_id.to_owned(), validated.range);
        }
        Ok(validated.warning)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Applies all queued scale changes in submission order and returns the
    /// affected layer ids.
    pub fn apply_pending(&mut self) -> GeonaResult<Vec<String>> {
        let pending = std::mem::take(&mut self.pending);
        let mut applied = Vec::with_capacity(pending.len());
        for (layer_id, range) in pending {
            self.apply_scale(&layer_id, range)?;
            applied.push(layer_id);
        }
        Ok(applied)
    }

    fn apply_scale(&mut self, layer_id: &str, range: ScaleRange) -> GeonaResult<()> {
        let layer = self
            .layers
            .get_mut(layer_id)
            .ok_or_else(|| GeonaError::UnknownLayer(layer_id.to_owned()))?;
        layer.scale_min = Some(range.min);
        layer.scale_max = Some(range.max);
        layer.logarithmic = range.logarithmic;
        debug!(layer_id, range.min, range.max, range.logarithmic, "scale applied");
        self.dispatcher.emit(&GeonaEvent::ScaleApplied {
            layer_id: layer_id.to_owned(),
        });
        Ok(())
    }

    /// Constructs the timebar for this map.
    ///
    /// At most one timebar may exist per registry; a second attach fails
    /// before any timebar state is created.
    pub fn attach_timebar(
        &mut self,
        markers: &[TimeMarker],
        selected: f64,
        extent: Extent,
    ) -> GeonaResult<Timebar> {
        if self.timebar_minted {
            return Err(GeonaError::TimebarAlreadyAttached);
        }
        let timebar = Timebar::new(TimebarToken::mint(), markers, selected, extent)?;
        self.timebar_minted = true;
        Ok(timebar)
    }

    /// Releases a committed drag: emits the selection event and snaps every
    /// temporal layer to its nearest valid time.
    pub fn commit_drag(&mut self, timebar: &mut Timebar) -> GeonaResult<DragOutcome> {
        let outcome = timebar.end_drag()?;
        if let Some(time) = outcome.committed {
            self.dispatcher.emit(&GeonaEvent::TimeSelected { time });
            self.load_nearest_time(time)?;
        }
        Ok(outcome)
    }

    /// Snaps each temporal layer to its nearest valid time for `time`.
    ///
    /// Layers with a discrete time list snap to the closest instant; layers
    /// with only a range clamp into it. Returns `(layer_id, snapped_time)`
    /// for every layer that was updated.
    pub fn load_nearest_time(&mut self, time: f64) -> GeonaResult<Vec<(String, f64)>> {
        if !time.is_finite() {
            return Err(GeonaError::InvalidData(
                "target time must be finite".to_owned(),
            ));
        }

        let mut updated = Vec::new();
        for layer in self.layers.values() {
            let Some(snapped) = nearest_valid_time(layer, time) else {
                continue;
            };
            updated.push((layer.id.clone(), snapped));
        }
        debug!(time, layers = updated.len(), "loaded layers to nearest valid time");
        Ok(updated)
    }

    /// Broadcasts a container resize to every subscribed panel.
    pub fn notify_resize(&mut self, width: u32) {
        self.dispatcher.emit(&GeonaEvent::Resize { width });
    }

    /// One-shot map-load completion notification.
    pub fn notify_map_ready(&mut self) {
        self.dispatcher.emit_map_ready();
    }

    pub fn events(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }
}

fn nearest_valid_time(layer: &Layer, time: f64) -> Option<f64> {
    if !layer.times.is_empty() {
        return layer
            .times
            .iter()
            .copied()
            .min_by_key(|candidate| OrderedFloat((candidate - time).abs()));
    }
    if layer.has_temporal_range() {
        let first = layer.first_time?;
        let last = layer.last_time?;
        return Some(time.clamp(first, last));
    }
    None
}
