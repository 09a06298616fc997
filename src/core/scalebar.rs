use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::error::{GeonaError, GeonaResult};

/// Number of axis ticks on a scalebar.
pub const TICK_COUNT: usize = 5;

/// Numeric scale range attached to a layer's color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    pub logarithmic: bool,
}

/// One scalebar axis tick: raw value plus its standard-form label.
///
/// Ephemeral: recomputed on every scalebar redraw, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl ScaleRange {
    pub fn new(min: f64, max: f64, logarithmic: bool) -> GeonaResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GeonaError::ScaleValidation(
                "scale bounds must be finite numbers".to_owned(),
            ));
        }
        if min > max {
            return Err(GeonaError::ScaleValidation(format!(
                "scale min {min} is greater than max {max}"
            )));
        }
        if logarithmic && min <= 0.0 {
            return Err(GeonaError::ScaleValidation(
                "logarithmic scale requires min > 0".to_owned(),
            ));
        }
        Ok(Self {
            min,
            max,
            logarithmic,
        })
    }

    /// Produces exactly five ticks, evenly spaced across the range.
    ///
    /// Logarithmic ranges space the ticks evenly in log-space, so the first
    /// tick is always `min` and the last is always `max`.
    #[must_use]
    pub fn ticks(self) -> SmallVec<[Tick; TICK_COUNT]> {
        let denominator = (TICK_COUNT - 1) as f64;
        let mut ticks = SmallVec::new();
        for index in 0..TICK_COUNT {
            let ratio = (index as f64) / denominator;
            let value = if self.logarithmic {
                let log_span = self.max.ln() - self.min.ln();
                (self.min.ln() + ratio * log_span).exp()
            } else if index == 0 {
                self.min
            } else if index == TICK_COUNT - 1 {
                // Pin the endpoint: min + span can round an ulp away from max.
                self.max
            } else {
                self.min + ratio * (self.max - self.min)
            };
            ticks.push(Tick {
                value,
                label: standard_form(value),
            });
        }
        ticks
    }
}

/// Formats a value in standard form with a 2-digit mantissa.
#[must_use]
pub fn standard_form(value: f64) -> String {
    format!("{value:.2e}")
}

/// Outcome of scale-input validation.
///
/// `warning` carries the user-facing message for recoverable corrections
/// (currently only "logarithmic disabled for non-positive minimum").
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedScale {
    pub range: ScaleRange,
    pub warning: Option<String>,
}

/// Parses and validates user-entered scale bounds.
///
/// Non-numeric or non-finite input and `min > max` are hard errors. A
/// logarithmic request with `min <= 0` is corrected instead of rejected:
/// the logarithmic flag is dropped and a warning is surfaced.
pub fn validate_scale(min_text: &str, max_text: &str, logarithmic: bool) -> GeonaResult<ValidatedScale> {
    let min = parse_bound(min_text, "min")?;
    let max = parse_bound(max_text, "max")?;

    if min > max {
        return Err(GeonaError::ScaleValidation(format!(
            "scale min {min} is greater than max {max}"
        )));
    }

    let mut warning = None;
    let mut logarithmic = logarithmic;
    if logarithmic && min <= 0.0 {
        warn!(min, "disabling logarithmic scale: minimum is not positive");
        warning = Some(format!(
            "A logarithmic scale needs a minimum greater than zero; \
             using a linear scale for minimum {min}."
        ));
        logarithmic = false;
    }

    Ok(ValidatedScale {
        range: ScaleRange {
            min,
            max,
            logarithmic,
        },
        warning,
    })
}

fn parse_bound(text: &str, name: &str) -> GeonaResult<f64> {
    let value: f64 = text.trim().parse().map_err(|_| {
        GeonaError::ScaleValidation(format!("scale {name} `{text}` is not a number"))
    })?;
    if !value.is_finite() {
        return Err(GeonaError::ScaleValidation(format!(
            "scale {name} `{text}` is not finite"
        )));
    }
    Ok(value)
}
