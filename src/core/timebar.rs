use tracing::debug;

use crate::core::scale::LinearScale;
use crate::core::types::{Extent, TimeMarker};
use crate::error::{GeonaError, GeonaResult};

/// Half of the fallback window used when no markers exist: 182.6 days.
pub const HALF_WINDOW_SECONDS: f64 = 182.6 * 86_400.0;

/// Outward extension applied to each zoom bound when padding is requested.
pub const ZOOM_PADDING_RATIO: f64 = 0.05;

/// Proof that the owning registry has granted its single timebar slot.
///
/// Only one token is ever minted per registry, which makes a second timebar
/// construction fail before any timebar state exists.
#[derive(Debug)]
pub struct TimebarToken {
    _private: (),
}

impl TimebarToken {
    pub(crate) fn mint() -> Self {
        Self { _private: () }
    }
}

/// What happened when a drag gesture was released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    /// Newly committed selected date, if the drag moved it.
    pub committed: Option<f64>,
    /// True when the view zoomed to bring the new selection back into view.
    pub rezoomed: bool,
}

/// Time-axis state machine: a mutable (domain, range) mapping plus the
/// selected date and drag bookkeeping.
///
/// All transitions run to completion on the caller's thread; zoom and drag
/// are mutually exclusive because `is_dragging` suppresses click-to-select
/// for the duration of a gesture.
#[derive(Debug)]
pub struct Timebar {
    domain: (f64, f64),
    extent: Extent,
    selected: f64,
    dragged: Option<f64>,
    is_dragging: bool,
    _token: TimebarToken,
}

impl Timebar {
    /// Builds the timebar from its markers.
    ///
    /// The initial domain spans the markers' earliest start to latest end;
    /// with no markers it is `selected` plus/minus 182.6 days.
    pub fn new(
        token: TimebarToken,
        markers: &[TimeMarker],
        selected: f64,
        extent: Extent,
    ) -> GeonaResult<Self> {
        if !extent.is_valid() {
            return Err(GeonaError::InvalidExtent {
                width: extent.width,
            });
        }
        if !selected.is_finite() {
            return Err(GeonaError::InvalidData(
                "selected date must be finite".to_owned(),
            ));
        }

        let domain = initial_domain(markers, selected);
        Ok(Self {
            domain,
            extent,
            selected,
            dragged: None,
            is_dragging: false,
            _token: token,
        })
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[must_use]
    pub fn selected(&self) -> f64 {
        self.selected
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Pixel position of the selected-date marker under the current mapping.
    pub fn selected_pixel(&self) -> GeonaResult<f64> {
        self.scale()?.domain_to_pixel(self.selected, self.extent)
    }

    pub fn time_to_pixel(&self, time: f64) -> GeonaResult<f64> {
        self.scale()?.domain_to_pixel(time, self.extent)
    }

    pub fn pixel_to_time(&self, pixel: f64) -> GeonaResult<f64> {
        self.scale()?.pixel_to_domain(pixel, self.extent)
    }

    /// Zoom/pan transition.
    ///
    /// An omitted bound keeps that edge where it visually is: it is resolved
    /// by inverting the corresponding pixel-range edge through the current
    /// scale. With `padding`, both bounds then extend outward by 5% of the
    /// resolved span — on every call, so repeated padded zooms keep growing
    /// the domain.
    pub fn zoom(
        &mut self,
        start: Option<f64>,
        end: Option<f64>,
        padding: bool,
    ) -> GeonaResult<()> {
        let mut start = match start {
            Some(value) => value,
            None => self.scale()?.pixel_to_domain(0.0, self.extent)?,
        };
        let mut end = match end {
            Some(value) => value,
            None => self
                .scale()?
                .pixel_to_domain(f64::from(self.extent.width), self.extent)?,
        };

        if !start.is_finite() || !end.is_finite() {
            return Err(GeonaError::InvalidData(
                "zoom bounds must be finite".to_owned(),
            ));
        }
        if start >= end {
            return Err(GeonaError::InvalidData(format!(
                "zoom start {start} is not before end {end}"
            )));
        }

        if padding {
            let pad = ZOOM_PADDING_RATIO * (end - start);
            start -= pad;
            end += pad;
        }

        debug!(start, end, padding, "timebar zoom");
        self.domain = (start, end);
        self.clamp_selected_into_view();
        Ok(())
    }

    /// Resize transition: the pixel range becomes `[0, new_width]`; the
    /// domain is unchanged.
    pub fn resize(&mut self, new_width: u32) -> GeonaResult<()> {
        let extent = Extent::new(new_width);
        if !extent.is_valid() {
            return Err(GeonaError::InvalidExtent { width: new_width });
        }
        debug!(new_width, "timebar resize");
        self.extent = extent;
        Ok(())
    }

    /// Starts a drag gesture at pixel `x`.
    pub fn begin_drag(&mut self, x: f64) -> GeonaResult<()> {
        if self.is_dragging {
            return Err(GeonaError::InvalidData(
                "a drag gesture is already active".to_owned(),
            ));
        }
        self.is_dragging = true;
        self.dragged = Some(self.dragged_time_at(x)?);
        Ok(())
    }

    /// Tracks pointer movement during a drag and returns the dragged date.
    ///
    /// The pixel position is clamped into `[0, width]` so the dragged date
    /// cannot leave the visible mapping.
    pub fn drag_to(&mut self, x: f64) -> GeonaResult<f64> {
        if !self.is_dragging {
            return Err(GeonaError::InvalidData(
                "drag_to without an active drag".to_owned(),
            ));
        }
        let time = self.dragged_time_at(x)?;
        self.dragged = Some(time);
        Ok(time)
    }

    /// Releases the gesture, committing the dragged date when it moved.
    ///
    /// A commit that lands outside the visible domain zooms the view (only
    /// the out-of-view bound supplied) to bring it back in. The caller is
    /// expected to forward `committed` to the owning map's nearest-time load.
    pub fn end_drag(&mut self) -> GeonaResult<DragOutcome> {
        if !self.is_dragging {
            return Err(GeonaError::InvalidData(
                "end_drag without an active drag".to_owned(),
            ));
        }
        self.is_dragging = false;

        let dragged = self.dragged.take();
        let Some(dragged) = dragged else {
            return Ok(DragOutcome {
                committed: None,
                rezoomed: false,
            });
        };
        if dragged == self.selected {
            return Ok(DragOutcome {
                committed: None,
                rezoomed: false,
            });
        }

        self.selected = dragged;
        let mut rezoomed = false;
        if self.selected < self.domain.0 {
            self.zoom(Some(self.selected), None, false)?;
            rezoomed = true;
        } else if self.selected > self.domain.1 {
            self.zoom(None, Some(self.selected), false)?;
            rezoomed = true;
        }

        debug!(selected = self.selected, rezoomed, "timebar drag committed");
        Ok(DragOutcome {
            committed: Some(self.selected),
            rezoomed,
        })
    }

    /// Click-to-select. Suppressed while a drag gesture is active.
    pub fn click_select(&mut self, x: f64) -> GeonaResult<Option<f64>> {
        if self.is_dragging {
            return Ok(None);
        }
        let time = self.dragged_time_at(x)?;
        self.selected = time;
        Ok(Some(time))
    }

    fn dragged_time_at(&self, x: f64) -> GeonaResult<f64> {
        if !x.is_finite() {
            return Err(GeonaError::InvalidData("pixel must be finite".to_owned()));
        }
        let clamped = x.clamp(0.0, f64::from(self.extent.width));
        self.scale()?.pixel_to_domain(clamped, self.extent)
    }

    fn clamp_selected_into_view(&mut self) {
        self.selected = self.selected.clamp(self.domain.0, self.domain.1);
    }

    fn scale(&self) -> GeonaResult<LinearScale> {
        LinearScale::new(self.domain.0, self.domain.1)
    }
}

fn initial_domain(markers: &[TimeMarker], selected: f64) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for marker in markers {
        min = min.min(marker.start());
        max = max.max(marker.end());
    }

    if min <= max {
        (min, max)
    } else {
        (selected - HALF_WINDOW_SECONDS, selected + HALF_WINDOW_SECONDS)
    }
}
