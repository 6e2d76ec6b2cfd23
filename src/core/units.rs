use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

pub const SECOND_IN_MILLISECONDS: i64 = 1_000;
pub const MINUTE_IN_MILLISECONDS: i64 = 60 * SECOND_IN_MILLISECONDS;
pub const HOUR_IN_MILLISECONDS: i64 = 60 * MINUTE_IN_MILLISECONDS;
pub const DAY_IN_MILLISECONDS: i64 = 24 * HOUR_IN_MILLISECONDS;
/// Calendar-approximate month used for thresholds and structured durations.
pub const MONTH_IN_MILLISECONDS: i64 = 30 * DAY_IN_MILLISECONDS;
/// Calendar-approximate year (12 approximate months, not leap-aware).
pub const YEAR_IN_MILLISECONDS: i64 = 12 * MONTH_IN_MILLISECONDS;

/// Calendar granularity, ordered from finest to coarsest.
///
/// Deserialization goes through [`FromStr`], so `"days"` and `" Year "` load too.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TimeUnit {
    #[default]
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Millisecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    /// Fixed conversion factor used by structured durations and zoom thresholds.
    #[must_use]
    pub const fn millis(self) -> i64 {
        match self {
            Self::Millisecond => 1,
            Self::Second => SECOND_IN_MILLISECONDS,
            Self::Minute => MINUTE_IN_MILLISECONDS,
            Self::Hour => HOUR_IN_MILLISECONDS,
            Self::Day => DAY_IN_MILLISECONDS,
            Self::Month => MONTH_IN_MILLISECONDS,
            Self::Year => YEAR_IN_MILLISECONDS,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = TimelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = TimelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let normalized = normalized.strip_suffix('s').unwrap_or(&normalized);
        Self::ALL
            .into_iter()
            .find(|unit| unit.name() == normalized)
            .ok_or_else(|| TimelineError::InvalidConfig(format!("unknown time unit `{value}`")))
    }
}

/// Structured duration: a count per unit, any subset of units.
///
/// Serializes as a plain map, e.g. `{"day": 2, "hour": 3}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationSpec {
    counts: IndexMap<TimeUnit, f64>,
}

impl DurationSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single-unit duration.
    #[must_use]
    pub fn of(count: f64, unit: TimeUnit) -> Self {
        Self::new().with(unit, count)
    }

    #[must_use]
    pub fn with(mut self, unit: TimeUnit, count: f64) -> Self {
        self.counts.insert(unit, count);
        self
    }

    #[must_use]
    pub fn count(&self, unit: TimeUnit) -> f64 {
        self.counts.get(&unit).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimeUnit, f64)> + '_ {
        self.counts.iter().map(|(unit, count)| (*unit, *count))
    }

    /// Rejects non-finite counts.
    pub fn validate(&self) -> TimelineResult<()> {
        if let Some((unit, _)) = self.iter().find(|(_, count)| !count.is_finite()) {
            return Err(TimelineError::InvalidData(format!(
                "duration count for `{unit}` must be finite"
            )));
        }
        Ok(())
    }

    /// Sums `count * factor(unit)` over present units, rounded to whole milliseconds.
    ///
    /// Non-finite counts contribute nothing; call [`DurationSpec::validate`] to reject them.
    #[must_use]
    pub fn to_millis(&self) -> i64 {
        let total: f64 = self
            .iter()
            .filter(|(_, count)| count.is_finite())
            .map(|(unit, count)| count * unit.millis() as f64)
            .sum();
        saturating_round(total)
    }
}

pub(crate) fn saturating_round(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let rounded = value.round();
    if rounded >= i64::MAX as f64 {
        i64::MAX
    } else if rounded <= i64::MIN as f64 {
        i64::MIN
    } else {
        rounded as i64
    }
}

#[cfg(test)]
mod tests {
    use super::{DurationSpec, TimeUnit};

    #[test]
    fn units_are_ordered_by_magnitude() {
        for pair in TimeUnit::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].millis() < pair[1].millis());
        }
    }

    #[test]
    fn unit_names_parse_with_plural_and_case() {
        assert_eq!("Days".parse::<TimeUnit>().expect("days"), TimeUnit::Day);
        assert_eq!(" year ".parse::<TimeUnit>().expect("year"), TimeUnit::Year);
        assert!("fortnight".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn approximate_month_and_year_factors() {
        assert_eq!(TimeUnit::Month.millis(), 30 * 86_400_000);
        assert_eq!(TimeUnit::Year.millis(), 12 * TimeUnit::Month.millis());
    }

    #[test]
    fn duration_spec_sums_present_units_only() {
        let spec = DurationSpec::new()
            .with(TimeUnit::Hour, 1.0)
            .with(TimeUnit::Second, 30.0)
            .with(TimeUnit::Millisecond, 5.0);
        assert_eq!(spec.to_millis(), 3_600_000 + 30_000 + 5);
        assert_eq!(DurationSpec::new().to_millis(), 0);
    }

    #[test]
    fn duration_spec_deserializes_from_unit_map() {
        let spec: DurationSpec =
            serde_json::from_str(r#"{"day": 2, "minute": -1.5}"#).expect("parse");
        assert_eq!(spec.count(TimeUnit::Day), 2.0);
        assert_eq!(spec.to_millis(), 2 * 86_400_000 - 90_000);
    }

    #[test]
    fn duration_spec_validate_rejects_nan() {
        let spec = DurationSpec::of(f64::NAN, TimeUnit::Day);
        assert!(spec.validate().is_err());
    }
}
