use smallvec::SmallVec;

use crate::api::config::ScaleDefaults;
use crate::api::registry::{LayerRegistry, SourceParams};
use crate::core::layer::{Layer, LayerStyle};
use crate::core::scalebar::{ScaleRange, TICK_COUNT, Tick};
use crate::error::{GeonaError, GeonaResult};

/// Dimensions used when the active style declares no legend template.
pub const DEFAULT_LEGEND_WIDTH: u32 = 1;
pub const DEFAULT_LEGEND_HEIGHT: u32 = 500;

/// Everything a scalebar panel needs to redraw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalebarDetails {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub ticks: SmallVec<[Tick; TICK_COUNT]>,
}

/// Resolves the scalebar drawing details for a layer.
///
/// The layer must already be in the registry's available set; a missing
/// layer is a hard error. Legend dimensions come from the active style's
/// template when it declares them, otherwise a 1x500 strip is requested.
pub fn scalebar_details(
    registry: &LayerRegistry,
    layer_id: &str,
) -> GeonaResult<ScalebarDetails> {
    let layer = registry.layer(layer_id)?;
    let params = registry.source_params(layer_id)?;
    let range = current_scale_range(layer)?;

    let (width, height) = match layer.current_style().and_then(|style| style.legend.as_ref()) {
        Some(template) => (template.width, template.height),
        None => (DEFAULT_LEGEND_WIDTH, DEFAULT_LEGEND_HEIGHT),
    };

    let url = legend_url(layer, params, registry.defaults(), false)?;
    Ok(ScalebarDetails {
        url,
        width,
        height,
        ticks: range.ticks(),
    })
}

/// Builds the legend-image request URL for a layer.
///
/// With a legend template the template base is reused and `HEIGHT`, `WIDTH`
/// and `COLORBARONLY` are appended from style settings; without one a
/// `GetLegendGraphic` PNG request is synthesized against the layer's server.
/// In preview mode the layer's default scale/style/band parameters are
/// substituted for the current user-set ones, so the swatch shows the layer
/// as served.
pub fn legend_url(
    layer: &Layer,
    params: &SourceParams,
    defaults: &ScaleDefaults,
    preview: bool,
) -> GeonaResult<String> {
    let style = resolve_style(layer, params, preview);
    let range = if preview {
        preview_scale_range(layer)?
    } else {
        current_scale_range(layer)?
    };

    let (bands, above, below) = if preview {
        (
            defaults.num_color_bands,
            defaults.above_max_color.as_str(),
            defaults.below_min_color.as_str(),
        )
    } else {
        (
            params.num_color_bands,
            params.above_max_color.as_str(),
            params.below_min_color.as_str(),
        )
    };

    let tail = format!(
        "COLORSCALERANGE={},{}&LOGSCALE={}&NUMCOLORBANDS={}&ABOVEMAXCOLOR={}&BELOWMINCOLOR={}",
        range.min, range.max, range.logarithmic, bands, above, below
    );

    match style.and_then(|style| style.legend.as_ref().map(|legend| (style, legend))) {
        Some((style, template)) => {
            let query = format!(
                "HEIGHT={}&WIDTH={}&COLORBARONLY={}&{}",
                template.height, template.width, style.colorbar_only, tail
            );
            Ok(with_query(&template.base_url, &query))
        }
        None => {
            let query = format!(
                "REQUEST=GetLegendGraphic&LAYER={}&FORMAT=image/png&{}",
                layer.id, tail
            );
            Ok(with_query(&layer.server.base_url, &query))
        }
    }
}

fn resolve_style<'a>(
    layer: &'a Layer,
    params: &SourceParams,
    preview: bool,
) -> Option<&'a LayerStyle> {
    if preview {
        return layer.default_style();
    }
    match &params.style {
        Some(id) => layer.style(id).or_else(|| layer.current_style()),
        None => layer.current_style(),
    }
}

fn current_scale_range(layer: &Layer) -> GeonaResult<ScaleRange> {
    let min = layer.scale_min.or(layer.scale_min_default);
    let max = layer.scale_max.or(layer.scale_max_default);
    build_range(layer, min, max)
}

fn preview_scale_range(layer: &Layer) -> GeonaResult<ScaleRange> {
    let min = layer.scale_min_default.or(layer.scale_min);
    let max = layer.scale_max_default.or(layer.scale_max);
    build_range(layer, min, max)
}

fn build_range(layer: &Layer, min: Option<f64>, max: Option<f64>) -> GeonaResult<ScaleRange> {
    let (Some(min), Some(max)) = (min, max) else {
        return Err(GeonaError::ScaleValidation(format!(
            "layer `{}` declares no numeric scale range",
            layer.id
        )));
    };
    ScaleRange::new(min, max, layer.logarithmic)
}

/// Appends a query string, inserting the leading `?` exactly once.
///
/// A base that already contains `?` gets an `&` join instead; `&` joins the
/// caller already assembled inside `query` are reused as-is.
fn with_query(base: &str, query: &str) -> String {
    if query.is_empty() {
        return base.to_owned();
    }
    if base.contains('?') {
        format!("{base}&{query}")
    } else {
        format!("{base}?{query}")
    }
}
