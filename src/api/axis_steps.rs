use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{Calendar, DisplayStep, TimeUnit, Viewport, ZoomLevel};
use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_STEP_MIN_WIDTH_PX: f64 = 40.0;

/// Smallest width a single step may occupy on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StepMinWidthRepr", into = "String")]
pub enum StepMinWidth {
    /// Percent of the container width.
    Percent(f64),
    Pixels(f64),
}

impl Default for StepMinWidth {
    fn default() -> Self {
        Self::Pixels(DEFAULT_STEP_MIN_WIDTH_PX)
    }
}

impl StepMinWidth {
    /// Maximum number of steps that fit, `+inf` for a zero width.
    ///
    /// Non-positive and non-finite widths degrade to zero with a warning.
    #[must_use]
    pub fn max_steps(self, container_width_px: f64) -> f64 {
        let (value, budget) = match self {
            Self::Percent(value) => (value, 100.0),
            Self::Pixels(value) => (value, container_width_px),
        };
        let value = if value.is_finite() && value > 0.0 {
            value
        } else {
            warn!(?self, "degenerate step min width, using 0");
            0.0
        };
        if value == 0.0 {
            return f64::INFINITY;
        }
        budget / value
    }
}

impl FromStr for StepMinWidth {
    type Err = TimelineError;

    /// Accepts `"40px"`, `"10%"` or a bare number (pixels).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let parse_number = |number: &str| {
            number.trim().parse::<f64>().map_err(|_| {
                TimelineError::InvalidConfig(format!("invalid step min width `{value}`"))
            })
        };

        if let Some(number) = trimmed.strip_suffix('%') {
            return parse_number(number).map(Self::Percent);
        }
        if let Some(number) = trimmed.strip_suffix("px") {
            return parse_number(number).map(Self::Pixels);
        }
        parse_number(trimmed).map(Self::Pixels)
    }
}

impl fmt::Display for StepMinWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(value) => write!(f, "{value}%"),
            Self::Pixels(value) => write!(f, "{value}px"),
        }
    }
}

impl From<StepMinWidth> for String {
    fn from(value: StepMinWidth) -> Self {
        value.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepMinWidthRepr {
    Text(String),
    Pixels(f64),
}

impl TryFrom<StepMinWidthRepr> for StepMinWidth {
    type Error = TimelineError;

    fn try_from(value: StepMinWidthRepr) -> TimelineResult<Self> {
        match value {
            StepMinWidthRepr::Text(text) => text.parse(),
            StepMinWidthRepr::Pixels(value) => Ok(Self::Pixels(value)),
        }
    }
}

/// One displayed row of axis steps. Index 0 of the planner output is the main level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepLevel<D> {
    pub unit: TimeUnit,
    pub scale: u32,
    pub steps: Vec<DisplayStep<D>>,
}

/// Chooses the granularities to display and positions their steps.
///
/// The main level is the finest catalogue entry whose spacing exceeds the
/// duration a single step may cover; coarser survivors that are major for it
/// become secondary rows.
pub fn compute_step_levels<C>(
    calendar: &C,
    viewport: &Viewport<C::Date>,
    container_width_px: f64,
    step_min_width: StepMinWidth,
) -> SmallVec<[StepLevel<C::Date>; 3]>
where
    C: Calendar + ?Sized,
{
    let catalogue = calendar.zoom_levels();
    let Some(fallback) = catalogue.last() else {
        return SmallVec::new();
    };

    let container_width_px = if container_width_px.is_finite() && container_width_px >= 0.0 {
        container_width_px
    } else {
        warn!(container_width_px, "invalid container width, using 0");
        0.0
    };

    let duration = viewport.duration(calendar) as f64;
    let max_steps = step_min_width.max_steps(container_width_px);
    let step_min_duration = if max_steps > 0.0 {
        duration / max_steps
    } else {
        f64::INFINITY
    };

    let survivors: SmallVec<[&ZoomLevel; 16]> = catalogue
        .iter()
        .filter(|level| level.threshold_ms as f64 > step_min_duration)
        .collect();
    let main = survivors.first().copied().unwrap_or(fallback);

    let mut chosen: SmallVec<[&ZoomLevel; 3]> = SmallVec::new();
    chosen.push(main);
    chosen.extend(
        survivors
            .iter()
            .skip(1)
            .copied()
            .filter(|level| level.is_major_level(main)),
    );

    debug!(
        duration_ms = duration,
        step_min_duration,
        main_unit = %main.unit,
        main_scale = main.scale,
        levels = chosen.len(),
        "computed axis step levels"
    );

    chosen
        .into_iter()
        .map(|level| StepLevel {
            unit: level.unit,
            scale: level.scale,
            steps: display_steps(calendar, viewport, level),
        })
        .collect()
}

fn display_steps<C>(
    calendar: &C,
    viewport: &Viewport<C::Date>,
    level: &ZoomLevel,
) -> Vec<DisplayStep<C::Date>>
where
    C: Calendar + ?Sized,
{
    let duration = viewport.duration(calendar) as f64;
    let steps = calendar.steps(level, viewport.start(), viewport.end());
    let offset_of =
        |date: C::Date| calendar.diff(date, viewport.start()) as f64 / duration * 100.0;

    let mut display = Vec::with_capacity(steps.len().saturating_sub(1));
    let Some(last) = steps.last() else {
        return display;
    };
    let mut next_offset = offset_of(last.date);
    for step in steps.iter().rev().skip(1) {
        let offset_percent = offset_of(step.date);
        display.push(DisplayStep {
            date: step.date,
            unit: step.unit,
            scale: step.scale,
            offset_percent,
            size_percent: next_offset - offset_percent,
        });
        next_offset = offset_percent;
    }
    display.reverse();
    display
}
