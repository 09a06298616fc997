use thiserror::Error;

pub type GeonaResult<T> = Result<T, GeonaError>;

#[derive(Debug, Error)]
pub enum GeonaError {
    #[error("invalid extent: width={width}")]
    InvalidExtent { width: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid scale: {0}")]
    ScaleValidation(String),

    #[error("layer `{0}` is not in the available-layer set")]
    UnknownLayer(String),

    #[error("a timebar is already attached to this layer registry")]
    TimebarAlreadyAttached,

    #[error("state payload is missing required keys {missing:?}: {payload}")]
    InvalidState {
        missing: Vec<String>,
        payload: serde_json::Value,
    },

    #[error("no saved state with id `{0}`")]
    UnknownState(String),

    #[error("state identifier space exhausted after {0} attempts")]
    StateIdCollision(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
