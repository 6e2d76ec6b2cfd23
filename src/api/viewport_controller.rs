use tracing::{debug, trace};

use crate::core::units::saturating_round;
use crate::core::{Calendar, DurationSpec, TimeUnit, Viewport};
use crate::error::{TimelineError, TimelineResult};

/// Pan/zoom arithmetic over immutable viewports.
///
/// Every operation returns a new viewport that satisfies its own bounds; the
/// input is never modified.
#[derive(Debug)]
pub struct ViewportController<'a, C: ?Sized> {
    calendar: &'a C,
}

impl<C: ?Sized> Clone for ViewportController<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for ViewportController<'_, C> {}

impl<'a, C> ViewportController<'a, C>
where
    C: Calendar + ?Sized,
{
    #[must_use]
    pub fn new(calendar: &'a C) -> Self {
        Self { calendar }
    }

    /// Shifts both ends by `delta_ms` (positive moves forward in time), then clamps.
    pub fn pan(
        &self,
        viewport: &Viewport<C::Date>,
        delta_ms: i64,
    ) -> TimelineResult<Viewport<C::Date>> {
        let start = self.shift(viewport.start(), delta_ms);
        let end = self.shift(viewport.end(), delta_ms);
        trace!(delta_ms, "pan viewport");
        self.clamp_window(viewport, start, end)
    }

    /// Pans by a structured duration such as `{"day": 1}`.
    pub fn pan_by(
        &self,
        viewport: &Viewport<C::Date>,
        duration: &DurationSpec,
    ) -> TimelineResult<Viewport<C::Date>> {
        duration.validate()?;
        self.pan(viewport, self.calendar.parse_duration(duration))
    }

    /// Pans by a horizontal drag distance.
    ///
    /// `distance_px` is the drag origin minus the current pointer position, so
    /// dragging to the left moves the window forward in time.
    pub fn pan_by_pixels(
        &self,
        viewport: &Viewport<C::Date>,
        distance_px: f64,
        container_width_px: f64,
    ) -> TimelineResult<Viewport<C::Date>> {
        validate_pixel_input(distance_px, container_width_px)?;
        let duration = viewport.duration(self.calendar) as f64;
        self.pan(
            viewport,
            saturating_round(duration * distance_px / container_width_px),
        )
    }

    /// Zooms around the center.
    ///
    /// A factor above 1 zooms in, a factor at or below -1 zooms out (`-2` doubles
    /// the window). Factors strictly between 0 and 1 are read as reciprocals, so
    /// `0.5` behaves like `-2`. A factor of magnitude 1 leaves the window as is.
    /// Factors strictly between -1 and 0 have no direction and are rejected.
    pub fn zoom(
        &self,
        viewport: &Viewport<C::Date>,
        factor: f64,
    ) -> TimelineResult<Viewport<C::Date>> {
        let factor = normalize_zoom_factor(factor)?;
        if factor.abs() == 1.0 {
            return self.clamp(viewport);
        }

        let duration = viewport.duration(self.calendar) as f64;
        let divisor = if factor < 1.0 { factor / 2.0 } else { factor };
        let offset = saturating_round(duration / 2.0 / divisor);

        let start = self.shift(viewport.start(), offset);
        let end = self.shift(viewport.end(), offset.saturating_neg());
        debug!(factor, offset_ms = offset, "zoom viewport");
        self.clamp_window(viewport, start, end)
    }

    /// Forces the window back inside its bounds.
    ///
    /// Steps run in a fixed order: grow to the minimum duration, shrink to the
    /// maximum duration, then shift right of `min_date` and left of `max_date`.
    pub fn clamp(&self, viewport: &Viewport<C::Date>) -> TimelineResult<Viewport<C::Date>> {
        self.clamp_window(viewport, viewport.start(), viewport.end())
    }

    /// Clamps a raw `[start, end]` candidate against the bounds of `viewport`.
    ///
    /// The candidate may be empty; growing to the minimum duration runs first.
    fn clamp_window(
        &self,
        viewport: &Viewport<C::Date>,
        mut start: C::Date,
        mut end: C::Date,
    ) -> TimelineResult<Viewport<C::Date>> {
        let calendar = self.calendar;
        let bounds = viewport.bounds();
        let mut duration = calendar.diff(end, start);

        let min_duration = viewport.effective_min_duration(calendar);
        if duration < min_duration {
            let deficit = min_duration - duration;
            start = self.shift(start, -(deficit / 2));
            end = self.shift(end, deficit - deficit / 2);
            duration = calendar.diff(end, start);
        }

        if let Some(max_duration) = viewport.effective_max_duration(calendar) {
            if duration > max_duration {
                let excess = duration - max_duration;
                start = self.shift(start, excess / 2);
                end = self.shift(end, -(excess - excess / 2));
            }
        }

        if let Some(min_date) = bounds.min_date {
            if calendar.is_before(start, min_date) {
                let offset = calendar.diff(min_date, start);
                start = self.shift(start, offset);
                end = self.shift(end, offset);
            }
        }

        if let Some(max_date) = bounds.max_date {
            if calendar.is_before(max_date, end) {
                let offset = calendar.diff(end, max_date);
                start = self.shift(start, -offset);
                end = self.shift(end, -offset);
            }
        }

        viewport.with_window(calendar, start, end)
    }

    /// Date under a horizontal pixel position of the container.
    pub fn date_at_pixel(
        &self,
        viewport: &Viewport<C::Date>,
        x_px: f64,
        container_width_px: f64,
    ) -> TimelineResult<C::Date> {
        validate_pixel_input(x_px, container_width_px)?;
        let duration = viewport.duration(self.calendar) as f64;
        Ok(self.shift(
            viewport.start(),
            saturating_round(duration * x_px / container_width_px),
        ))
    }

    fn shift(&self, date: C::Date, delta_ms: i64) -> C::Date {
        self.calendar.add(date, delta_ms, TimeUnit::Millisecond)
    }
}

fn normalize_zoom_factor(factor: f64) -> TimelineResult<f64> {
    if !factor.is_finite() || factor == 0.0 {
        return Err(TimelineError::InvalidData(
            "zoom factor must be finite and non-zero".to_owned(),
        ));
    }
    if factor > -1.0 && factor < 0.0 {
        return Err(TimelineError::InvalidData(format!(
            "zoom factor {factor} is ambiguous: zoom out with a factor <= -1"
        )));
    }
    if factor < 1.0 && factor > 0.0 {
        return Ok(-1.0 / factor);
    }
    Ok(factor)
}

fn validate_pixel_input(position_px: f64, container_width_px: f64) -> TimelineResult<()> {
    if !position_px.is_finite() {
        return Err(TimelineError::InvalidData(
            "pixel position must be finite".to_owned(),
        ));
    }
    if !container_width_px.is_finite() || container_width_px <= 0.0 {
        return Err(TimelineError::InvalidData(
            "container width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
