use geona_viz::api::{
    DEFAULT_LEGEND_HEIGHT, DEFAULT_LEGEND_WIDTH, LayerRegistry, ScaleDefaults, SourceParams,
    legend_url, scalebar_details,
};
use geona_viz::core::{Layer, LayerServer, LayerStyle};
use geona_viz::error::GeonaError;

fn server(base_url: &str) -> LayerServer {
    LayerServer {
        base_url: base_url.to_owned(),
        protocol: Default::default(),
    }
}

fn plain_layer() -> Layer {
    let mut layer = Layer::new("chlor_a", "Chlorophyll-a", server("http://tiles.example/wms"));
    layer.scale_min = Some(0.1);
    layer.scale_max = Some(10.0);
    layer.scale_min_default = Some(0.01);
    layer.scale_max_default = Some(67.0);
    layer
}

fn templated_layer() -> Layer {
    let mut layer = plain_layer();
    layer.insert_style(
        LayerStyle::new("boxfill/rainbow").with_legend("http://tiles.example/legend", 110, 264),
    );
    layer
}

fn params() -> SourceParams {
    SourceParams {
        style: Some("boxfill/rainbow".to_owned()),
        num_color_bands: 254,
        above_max_color: "#FF0000".to_owned(),
        below_min_color: "#000000".to_owned(),
    }
}

#[test]
fn synthesized_url_targets_the_layer_server() {
    let layer = plain_layer();
    let url = legend_url(&layer, &params(), &ScaleDefaults::default(), false).expect("url");

    assert_eq!(
        url,
        "http://tiles.example/wms?REQUEST=GetLegendGraphic&LAYER=chlor_a&FORMAT=image/png\
         &COLORSCALERANGE=0.1,10&LOGSCALE=false&NUMCOLORBANDS=254\
         &ABOVEMAXCOLOR=#FF0000&BELOWMINCOLOR=#000000"
    );
}

#[test]
fn templated_url_appends_style_dimensions() {
    let layer = templated_layer();
    let url = legend_url(&layer, &params(), &ScaleDefaults::default(), false).expect("url");

    assert!(url.starts_with("http://tiles.example/legend?HEIGHT=264&WIDTH=110&COLORBARONLY=true&"));
    assert!(url.contains("COLORSCALERANGE=0.1,10"));
    assert!(url.contains("LOGSCALE=false"));
}

#[test]
fn question_mark_is_never_duplicated() {
    let mut layer = plain_layer();
    layer.server = server("http://tiles.example/wms?SERVICE=WMS");

    let url = legend_url(&layer, &params(), &ScaleDefaults::default(), false).expect("url");

    assert_eq!(url.matches('?').count(), 1);
    assert!(url.starts_with("http://tiles.example/wms?SERVICE=WMS&REQUEST=GetLegendGraphic"));
}

#[test]
fn preview_substitutes_default_scale_and_band_parameters() {
    let layer = templated_layer();
    let mut current = params();
    current.num_color_bands = 10;
    current.above_max_color = "transparent".to_owned();

    let url = legend_url(&layer, &current, &ScaleDefaults::default(), true).expect("url");

    // Defaults, not the user-set values.
    assert!(url.contains("COLORSCALERANGE=0.01,67"));
    assert!(url.contains("NUMCOLORBANDS=255"));
    assert!(url.contains("ABOVEMAXCOLOR=extend"));
    assert!(!url.contains("NUMCOLORBANDS=10"));
}

#[test]
fn logarithmic_flag_is_reflected_in_the_query() {
    let mut layer = plain_layer();
    layer.logarithmic = true;

    let url = legend_url(&layer, &params(), &ScaleDefaults::default(), false).expect("url");
    assert!(url.contains("LOGSCALE=true"));
}

#[test]
fn missing_scale_range_is_a_hard_error() {
    let layer = Layer::new("bare", "Bare", server("http://tiles.example/wms"));
    let result = legend_url(&layer, &params(), &ScaleDefaults::default(), false);
    assert!(matches!(result, Err(GeonaError::ScaleValidation(_))));
}

#[test]
fn scalebar_details_uses_template_dimensions_when_declared() {
    let mut registry = LayerRegistry::new(ScaleDefaults::default());
    registry.insert_layer(templated_layer());

    let details = scalebar_details(&registry, "chlor_a").expect("details");
    assert_eq!(details.width, 110);
    assert_eq!(details.height, 264);
    assert_eq!(details.ticks.len(), 5);
    assert_eq!(details.ticks[0].value, 0.1);
    assert_eq!(details.ticks[4].value, 10.0);
}

#[test]
fn scalebar_details_defaults_to_a_1x500_strip_without_a_template() {
    let mut registry = LayerRegistry::new(ScaleDefaults::default());
    registry.insert_layer(plain_layer());

    let details = scalebar_details(&registry, "chlor_a").expect("details");
    assert_eq!(details.width, DEFAULT_LEGEND_WIDTH);
    assert_eq!(details.height, DEFAULT_LEGEND_HEIGHT);
    assert!(details.url.contains("REQUEST=GetLegendGraphic"));
}

#[test]
fn scalebar_details_for_an_unknown_layer_is_a_hard_error() {
    let registry = LayerRegistry::new(ScaleDefaults::default());
    let result = scalebar_details(&registry, "missing");
    assert!(matches!(result, Err(GeonaError::UnknownLayer(_))));
}
