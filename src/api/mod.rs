pub mod config;
pub mod events;
pub mod legend;
pub mod registry;

pub use config::{GeonaConfig, ScaleDefaults};
pub use events::{EventDispatcher, GeonaEvent};
pub use legend::{
    DEFAULT_LEGEND_HEIGHT, DEFAULT_LEGEND_WIDTH, ScalebarDetails, legend_url, scalebar_details,
};
pub use registry::{LayerRegistry, SourceParams};
