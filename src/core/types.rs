use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::units::TimeUnit;
use crate::error::TimelineError;

/// Linear time point used by the Gregorian calendar: UTC milliseconds since the epoch.
///
/// Arithmetic saturates at [`Instant::MIN`] / [`Instant::MAX`] so every value
/// stays convertible to a chrono date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Instant(i64);

impl Instant {
    /// Roughly 190 000 years before the epoch.
    pub const MIN: Instant = Instant(-6_000_000_000_000_000);
    /// Roughly 190 000 years after the epoch.
    pub const MAX: Instant = Instant(6_000_000_000_000_000);
    pub const EPOCH: Instant = Instant(0);

    /// Builds an instant, clamping into the supported range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Builds an instant only when `millis` is inside the supported range.
    #[must_use]
    pub fn checked_from_millis(millis: i64) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&millis)
            .then_some(Self(millis))
    }

    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        Self::from_millis(time.timestamp_millis())
    }

    #[must_use]
    pub fn millis(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn saturating_add_millis(self, delta: i64) -> Self {
        Self::from_millis(self.0.saturating_add(delta))
    }

    /// Signed difference `self - other` in milliseconds.
    #[must_use]
    pub fn millis_since(self, other: Instant) -> i64 {
        self.0.saturating_sub(other.0)
    }

    #[must_use]
    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.0).unwrap_or_default()
    }
}

impl TryFrom<i64> for Instant {
    type Error = TimelineError;

    fn try_from(millis: i64) -> Result<Self, Self::Error> {
        Self::checked_from_millis(millis).ok_or_else(|| {
            TimelineError::InvalidData(format!(
                "instant {millis}ms is outside the supported range [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            ))
        })
    }
}

impl From<Instant> for i64 {
    fn from(value: Instant) -> Self {
        value.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.to_datetime()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        )
    }
}

/// One generated axis boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step<D> {
    pub date: D,
    pub unit: TimeUnit,
    pub scale: u32,
}

/// A step placed on the visible axis, in percent of the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayStep<D> {
    pub date: D,
    pub unit: TimeUnit,
    pub scale: u32,
    pub offset_percent: f64,
    pub size_percent: f64,
}

impl<D: Copy> DisplayStep<D> {
    #[must_use]
    pub fn step(&self) -> Step<D> {
        Step {
            date: self.date,
            unit: self.unit,
            scale: self.scale,
        }
    }

    /// Right edge of the step, in percent.
    #[must_use]
    pub fn end_percent(&self) -> f64 {
        self.offset_percent + self.size_percent
    }
}
