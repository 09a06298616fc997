//! geona-viz: layer-visualization core for the Geona map viewer.
//!
//! This crate provides the non-rendering logic behind Geona's map panels:
//! scalebar tick generation and legend URL construction, the timebar
//! domain/range state machine, and the layer registry that owns scale edits.

pub mod api;
pub mod core;
pub mod error;
pub mod state;
pub mod telemetry;

pub use api::{GeonaConfig, LayerRegistry};
pub use error::{GeonaError, GeonaResult};
