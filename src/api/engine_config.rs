use serde::{Deserialize, Serialize};

use crate::core::{CalendarConfig, DurationSpec, RowPackerConfig};
use crate::error::{TimelineError, TimelineResult};

use super::StepMinWidth;

/// Public engine bootstrap configuration.
///
/// Dates and durations stay in their host-facing form and are parsed by the
/// calendar when the engine is built, so the same file can be stored and
/// reloaded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub min_date: Option<String>,
    #[serde(default)]
    pub max_date: Option<String>,
    #[serde(default)]
    pub min_duration: Option<DurationSpec>,
    #[serde(default)]
    pub max_duration: Option<DurationSpec>,
    #[serde(default)]
    pub step_min_width: StepMinWidth,
    #[serde(default)]
    pub container_width_px: f64,
    #[serde(default)]
    pub row_packer: RowPackerConfig,
}

impl TimelineConfig {
    /// Creates a minimal config with an unbounded viewport.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            calendar: CalendarConfig::default(),
            start: start.into(),
            end: end.into(),
            min_date: None,
            max_date: None,
            min_duration: None,
            max_duration: None,
            step_min_width: StepMinWidth::default(),
            container_width_px: 0.0,
            row_packer: RowPackerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarConfig) -> Self {
        self.calendar = calendar;
        self
    }

    #[must_use]
    pub fn with_date_bounds(mut self, min_date: Option<String>, max_date: Option<String>) -> Self {
        self.min_date = min_date;
        self.max_date = max_date;
        self
    }

    #[must_use]
    pub fn with_duration_bounds(
        mut self,
        min_duration: Option<DurationSpec>,
        max_duration: Option<DurationSpec>,
    ) -> Self {
        self.min_duration = min_duration;
        self.max_duration = max_duration;
        self
    }

    #[must_use]
    pub fn with_step_min_width(mut self, step_min_width: StepMinWidth) -> Self {
        self.step_min_width = step_min_width;
        self
    }

    #[must_use]
    pub fn with_container_width(mut self, container_width_px: f64) -> Self {
        self.container_width_px = container_width_px;
        self
    }

    #[must_use]
    pub fn with_row_packer(mut self, row_packer: RowPackerConfig) -> Self {
        self.row_packer = row_packer;
        self
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize timeline config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse timeline config json: {e}"))
        })
    }
}

pub(super) fn validate_container_width(container_width_px: f64) -> TimelineResult<()> {
    if !container_width_px.is_finite() || container_width_px < 0.0 {
        return Err(TimelineError::InvalidData(
            "container width must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_row_packer_config(config: RowPackerConfig) -> TimelineResult<()> {
    if !config.horizontal_margin_px.is_finite() || config.horizontal_margin_px < 0.0 {
        return Err(TimelineError::InvalidConfig(
            "row packer horizontal margin must be finite and >= 0".to_owned(),
        ));
    }
    if !config.vertical_margin_px.is_finite() || config.vertical_margin_px < 0.0 {
        return Err(TimelineError::InvalidConfig(
            "row packer vertical margin must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}
