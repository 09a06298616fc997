pub mod layer;
pub mod scale;
pub mod scalebar;
pub mod timebar;
pub mod types;

pub use layer::{Layer, LayerProtocol, LayerServer, LayerStyle, LegendTemplate};
pub use scale::LinearScale;
pub use scalebar::{ScaleRange, Tick, ValidatedScale, validate_scale};
pub use timebar::{DragOutcome, Timebar, TimebarToken};
pub use types::{Extent, TimeMarker, datetime_to_unix_seconds};
