use std::fmt::Debug;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::types::Step;
use crate::core::units::{DurationSpec, TimeUnit};
use crate::error::{TimelineError, TimelineResult};

/// Date engine contract shared by the planner, positioner and viewport controller.
///
/// Dates are opaque to every consumer: they are only compared, diffed (in
/// milliseconds) and shifted through this trait, so an alternate calendar can
/// be substituted without touching the layout code.
pub trait Calendar {
    /// Raw, host-facing date representation accepted by [`Calendar::parse`].
    type Input: ?Sized;
    /// Parsed linear time point.
    type Date: Copy + Ord + Debug;

    /// Parses and floors the input to the configured minimum unit.
    fn parse(&self, input: &Self::Input) -> TimelineResult<Self::Date>;

    /// Serializes a date back into a host-facing string.
    fn unparse(&self, date: Self::Date) -> String;

    /// Converts a structured duration into milliseconds.
    fn parse_duration(&self, duration: &DurationSpec) -> i64 {
        duration.to_millis()
    }

    /// One unit of the configured minimum unit, in milliseconds.
    fn minimum_duration(&self) -> i64;

    fn is_before(&self, a: Self::Date, b: Self::Date) -> bool {
        a < b
    }

    /// Signed `a - b` in milliseconds.
    fn diff(&self, a: Self::Date, b: Self::Date) -> i64;

    fn add(&self, date: Self::Date, amount: i64, unit: TimeUnit) -> Self::Date;

    fn subtract(&self, date: Self::Date, amount: i64, unit: TimeUnit) -> Self::Date {
        self.add(date, amount.saturating_neg(), unit)
    }

    /// Label for `date` at `unit` granularity.
    ///
    /// When `only_unit` is false the label is prefixed/suffixed with the next
    /// coarser unit. `None` produces a full composite label.
    fn format(&self, date: Self::Date, unit: Option<TimeUnit>, only_unit: bool) -> String;

    fn is_important_step(&self, step: &Step<Self::Date>) -> bool;

    /// Ascending-by-threshold catalogue of granularities.
    fn zoom_levels(&self) -> &[ZoomLevel];

    /// Boundaries of `level` covering `[start, end]`, plus one trailing boundary at/after `end`.
    fn steps(&self, level: &ZoomLevel, start: Self::Date, end: Self::Date)
    -> Vec<Step<Self::Date>>;
}

/// One granularity at which axis ticks can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevel {
    pub unit: TimeUnit,
    pub scale: u32,
    /// Nominal spacing between two ticks, in milliseconds.
    pub threshold_ms: i64,
    major_for: &'static [TimeUnit],
}

impl ZoomLevel {
    #[must_use]
    pub const fn new(unit: TimeUnit, scale: u32, major_for: &'static [TimeUnit]) -> Self {
        Self {
            unit,
            scale,
            threshold_ms: unit.millis() * scale as i64,
            major_for,
        }
    }

    /// Whether this level is a suitable secondary row above `main`.
    #[must_use]
    pub fn is_major_level(&self, main: &ZoomLevel) -> bool {
        self.major_for.contains(&main.unit)
    }

    #[must_use]
    pub fn major_for(&self) -> &'static [TimeUnit] {
        self.major_for
    }
}

/// Locale used for month labels.
///
/// Loads from the same tags [`FromStr`] accepts, regional variants included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    #[must_use]
    pub fn month_labels(self) -> &'static [&'static str; 12] {
        match self {
            Self::En => &[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            Self::Fr => &[
                "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
                "nov.", "déc.",
            ],
        }
    }
}

impl FromStr for Locale {
    type Err = TimelineError;

    /// Accepts bare language tags and regional variants (`en`, `en-US`, `fr_CA`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let language = value
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            _ => Err(TimelineError::UnsupportedLocale(value.to_owned())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = TimelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable calendar configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_min_unit")]
    pub min_unit: TimeUnit,
    #[serde(default = "default_max_unit")]
    pub max_unit: TimeUnit,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            min_unit: default_min_unit(),
            max_unit: default_max_unit(),
        }
    }
}

impl CalendarConfig {
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_units(mut self, min_unit: TimeUnit, max_unit: TimeUnit) -> Self {
        self.min_unit = min_unit;
        self.max_unit = max_unit;
        self
    }

    pub(crate) fn validate(self) -> TimelineResult<Self> {
        if self.min_unit > self.max_unit {
            return Err(TimelineError::InvalidConfig(format!(
                "calendar min unit `{}` must not be coarser than max unit `{}`",
                self.min_unit, self.max_unit
            )));
        }
        Ok(self)
    }
}

fn default_min_unit() -> TimeUnit {
    TimeUnit::Millisecond
}

fn default_max_unit() -> TimeUnit {
    TimeUnit::Year
}
