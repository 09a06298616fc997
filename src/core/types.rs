use chrono::{DateTime, Utc};

use crate::error::{GeonaError, GeonaResult};

/// Horizontal pixel extent of a panel.
///
/// Both the timebar and the scalebar map their domains onto `[0, width]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
}

impl Extent {
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0
    }
}

/// Time-ranged event shown on the timebar.
///
/// Owned by whoever configures the timebar; the timebar only reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMarker {
    start: f64,
    end: f64,
}

impl TimeMarker {
    /// Creates a marker from unix-second bounds. Requires `start <= end`.
    pub fn new(start: f64, end: f64) -> GeonaResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(GeonaError::InvalidData(
                "marker bounds must be finite".to_owned(),
            ));
        }
        if start > end {
            return Err(GeonaError::InvalidData(format!(
                "marker start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> GeonaResult<Self> {
        Self::new(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
        )
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}
