use serde::{Deserialize, Serialize};

use crate::core::calendar::Calendar;
use crate::error::{TimelineError, TimelineResult};

/// Optional pan/zoom limits attached to a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportBounds<D> {
    pub min_date: Option<D>,
    pub max_date: Option<D>,
    /// Smallest visible duration, in milliseconds.
    pub min_duration: Option<i64>,
    /// Largest visible duration, in milliseconds.
    pub max_duration: Option<i64>,
}

impl<D> Default for ViewportBounds<D> {
    fn default() -> Self {
        Self {
            min_date: None,
            max_date: None,
            min_duration: None,
            max_duration: None,
        }
    }
}

impl<D> ViewportBounds<D> {
    #[must_use]
    pub fn with_dates(mut self, min_date: Option<D>, max_date: Option<D>) -> Self {
        self.min_date = min_date;
        self.max_date = max_date;
        self
    }

    #[must_use]
    pub fn with_durations(mut self, min_duration: Option<i64>, max_duration: Option<i64>) -> Self {
        self.min_duration = min_duration;
        self.max_duration = max_duration;
        self
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min_date.is_none()
            && self.max_date.is_none()
            && self.min_duration.is_none()
            && self.max_duration.is_none()
    }
}

/// Visible `[start, end)` window plus its bounds.
///
/// `start < end` always holds: construction validates, and pan/zoom produce a
/// new value instead of mutating this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport<D> {
    start: D,
    end: D,
    bounds: ViewportBounds<D>,
}

impl<D: Copy + Ord> Viewport<D> {
    /// Creates an unbounded viewport.
    pub fn new<C>(calendar: &C, start: D, end: D) -> TimelineResult<Self>
    where
        C: Calendar<Date = D> + ?Sized,
    {
        Self::with_bounds(calendar, start, end, ViewportBounds::default())
    }

    /// Creates a viewport after checking that the window and bounds are mutually consistent.
    pub fn with_bounds<C>(
        calendar: &C,
        start: D,
        end: D,
        bounds: ViewportBounds<D>,
    ) -> TimelineResult<Self>
    where
        C: Calendar<Date = D> + ?Sized,
    {
        if !calendar.is_before(start, end) {
            return Err(TimelineError::invalid_viewport(
                "end date must be after start date",
            ));
        }

        if let Some(min_date) = bounds.min_date {
            if calendar.is_before(start, min_date) {
                return Err(TimelineError::invalid_viewport(
                    "min date must not be after the start date",
                ));
            }
        }

        if let Some(max_date) = bounds.max_date {
            if calendar.is_before(max_date, end) {
                return Err(TimelineError::invalid_viewport(
                    "max date must not be before the end date",
                ));
            }
        }

        if let (Some(min_duration), Some(max_duration)) = (bounds.min_duration, bounds.max_duration)
        {
            if min_duration > max_duration {
                return Err(TimelineError::invalid_viewport(
                    "min duration must not exceed max duration",
                ));
            }
        }

        let duration = calendar.diff(end, start);
        let engine_minimum = calendar.minimum_duration();

        if let Some(min_duration) = bounds.min_duration {
            if min_duration < engine_minimum {
                return Err(TimelineError::invalid_viewport(format!(
                    "min duration {min_duration}ms is below the calendar minimum {engine_minimum}ms"
                )));
            }
            if min_duration > duration {
                return Err(TimelineError::invalid_viewport(format!(
                    "min duration {min_duration}ms exceeds the viewport duration {duration}ms"
                )));
            }
        }

        if let Some(max_duration) = bounds.max_duration {
            if max_duration < duration {
                return Err(TimelineError::invalid_viewport(format!(
                    "max duration {max_duration}ms is below the viewport duration {duration}ms"
                )));
            }
        }

        if let (Some(min_date), Some(max_date)) = (bounds.min_date, bounds.max_date) {
            let span = calendar.diff(max_date, min_date);
            let required = bounds.min_duration.unwrap_or(engine_minimum);
            if span < required {
                return Err(TimelineError::invalid_viewport(format!(
                    "date bounds span {span}ms is narrower than the required {required}ms"
                )));
            }
        }

        Ok(Self { start, end, bounds })
    }

    /// Same bounds, new window. Only the ordering is re-checked.
    pub(crate) fn with_window<C>(&self, calendar: &C, start: D, end: D) -> TimelineResult<Self>
    where
        C: Calendar<Date = D> + ?Sized,
    {
        if !calendar.is_before(start, end) {
            return Err(TimelineError::invalid_viewport(
                "end date must be after start date",
            ));
        }
        Ok(Self {
            start,
            end,
            bounds: self.bounds,
        })
    }

    #[must_use]
    pub fn start(&self) -> D {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> D {
        self.end
    }

    #[must_use]
    pub fn bounds(&self) -> &ViewportBounds<D> {
        &self.bounds
    }

    /// Visible duration in milliseconds (always > 0).
    #[must_use]
    pub fn duration<C>(&self, calendar: &C) -> i64
    where
        C: Calendar<Date = D> + ?Sized,
    {
        calendar.diff(self.end, self.start)
    }

    /// Largest allowed duration: explicit max, else the date-bounds span.
    #[must_use]
    pub fn effective_max_duration<C>(&self, calendar: &C) -> Option<i64>
    where
        C: Calendar<Date = D> + ?Sized,
    {
        self.bounds.max_duration.or(match (self.bounds.min_date, self.bounds.max_date) {
            (Some(min_date), Some(max_date)) => Some(calendar.diff(max_date, min_date)),
            _ => None,
        })
    }

    /// Smallest allowed duration: explicit min, else one calendar minimum unit.
    #[must_use]
    pub fn effective_min_duration<C>(&self, calendar: &C) -> i64
    where
        C: Calendar<Date = D> + ?Sized,
    {
        self.bounds
            .min_duration
            .unwrap_or_else(|| calendar.minimum_duration())
    }
}
