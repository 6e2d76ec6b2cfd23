use serde::{Deserialize, Serialize};

use crate::core::calendar::Calendar;
use crate::core::units::TimeUnit;
use crate::core::viewport::Viewport;
use crate::error::{TimelineError, TimelineResult};

/// How an interval overlaps the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalPosition {
    Outside,
    Inside,
    /// Starts inside, runs past the right edge.
    HeadOnly,
    /// Starts before the left edge, ends inside.
    TailOnly,
    /// Covers the whole window and overflows both edges.
    Cropped,
}

impl IntervalPosition {
    /// Classifies a placement expressed in percent of the viewport width.
    ///
    /// Edges are inclusive: an interval touching 0 or 100 still counts as inside.
    #[must_use]
    pub fn classify(offset_percent: f64, width_percent: f64) -> Self {
        let right = offset_percent + width_percent;
        if offset_percent < 0.0 && right > 0.0 {
            Self::TailOnly
        } else if offset_percent >= 0.0 && right <= 100.0 {
            Self::Inside
        } else if offset_percent < 100.0 && right > 100.0 {
            Self::HeadOnly
        } else if offset_percent < 0.0 && right > 100.0 {
            Self::Cropped
        } else {
            Self::Outside
        }
    }
}

/// Placement of an interval relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedInterval {
    pub offset_percent: f64,
    pub width_percent: f64,
    pub position: IntervalPosition,
}

/// Whether `start == end` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroWidthPolicy {
    #[default]
    Reject,
    /// Accept zero-width instant markers.
    Allow,
}

/// Maps `[start, end]` onto the viewport.
///
/// Returns `Ok(None)` when the interval lies entirely before or after the window.
pub fn position_interval<C>(
    calendar: &C,
    start: C::Date,
    end: C::Date,
    viewport: &Viewport<C::Date>,
    policy: ZeroWidthPolicy,
) -> TimelineResult<Option<PositionedInterval>>
where
    C: Calendar + ?Sized,
{
    let ordered = calendar.is_before(start, end)
        || (policy == ZeroWidthPolicy::Allow && start == end);
    if !ordered {
        return Err(TimelineError::invalid_interval(
            "interval end must be after its start",
        ));
    }

    if calendar.is_before(end, viewport.start()) || calendar.is_before(viewport.end(), start) {
        return Ok(None);
    }

    let duration = viewport.duration(calendar) as f64;
    let start_offset = calendar.diff(start, viewport.start()) as f64;
    let end_offset = calendar.diff(end, viewport.start()) as f64;

    let offset_percent = start_offset / duration * 100.0;
    let width_percent = (end_offset - start_offset) / duration * 100.0;

    Ok(Some(PositionedInterval {
        offset_percent,
        width_percent,
        position: IntervalPosition::classify(offset_percent, width_percent),
    }))
}

/// Places a point event, drawn as one calendar minimum unit starting at `date`.
pub fn position_event<C>(
    calendar: &C,
    date: C::Date,
    viewport: &Viewport<C::Date>,
) -> TimelineResult<Option<PositionedInterval>>
where
    C: Calendar + ?Sized,
{
    let end = calendar.add(date, calendar.minimum_duration(), TimeUnit::Millisecond);
    let policy = if end == date {
        ZeroWidthPolicy::Allow
    } else {
        ZeroWidthPolicy::Reject
    };
    position_interval(calendar, date, end, viewport, policy)
}

/// Offset of a single date, in percent of the viewport width (unbounded).
#[must_use]
pub fn offset_percent<C>(calendar: &C, date: C::Date, viewport: &Viewport<C::Date>) -> f64
where
    C: Calendar + ?Sized,
{
    calendar.diff(date, viewport.start()) as f64 / viewport.duration(calendar) as f64 * 100.0
}
