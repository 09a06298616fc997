use crate::core::types::Extent;
use crate::error::{GeonaError, GeonaResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> GeonaResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(GeonaError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, extent: Extent) -> GeonaResult<f64> {
        if !extent.is_valid() {
            return Err(GeonaError::InvalidExtent {
                width: extent.width,
            });
        }

        if !value.is_finite() {
            return Err(GeonaError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * f64::from(extent.width))
    }

    pub fn pixel_to_domain(self, pixel: f64, extent: Extent) -> GeonaResult<f64> {
        if !extent.is_valid() {
            return Err(GeonaError::InvalidExtent {
                width: extent.width,
            });
        }

        if !pixel.is_finite() {
            return Err(GeonaError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / f64::from(extent.width);
        Ok(self.domain_start + normalized * span)
    }
}
