use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};
use tracing::trace;

use crate::core::calendar::{Calendar, CalendarConfig, Locale, ZoomLevel};
use crate::core::step_generation::generate_steps;
use crate::core::types::{Instant, Step};
use crate::core::units::{DAY_IN_MILLISECONDS, TimeUnit};
use crate::core::zoom_levels::build_zoom_levels;
use crate::error::{TimelineError, TimelineResult};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Proleptic Gregorian calendar over UTC millisecond instants.
#[derive(Debug, Clone, PartialEq)]
pub struct GregorianCalendar {
    config: CalendarConfig,
    zoom_levels: Vec<ZoomLevel>,
}

impl Default for GregorianCalendar {
    fn default() -> Self {
        let config = CalendarConfig::default();
        Self {
            zoom_levels: build_zoom_levels(config.min_unit, config.max_unit),
            config,
        }
    }
}

impl GregorianCalendar {
    pub fn new(config: CalendarConfig) -> TimelineResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            zoom_levels: build_zoom_levels(config.min_unit, config.max_unit),
            config,
        })
    }

    /// Builds a calendar from a locale name such as `"en"` or `"fr-FR"`.
    pub fn from_parts(
        locale: &str,
        min_unit: TimeUnit,
        max_unit: TimeUnit,
    ) -> TimelineResult<Self> {
        let locale: Locale = locale.parse()?;
        Self::new(
            CalendarConfig::default()
                .with_locale(locale)
                .with_units(min_unit, max_unit),
        )
    }

    #[must_use]
    pub fn config(&self) -> CalendarConfig {
        self.config
    }

    /// Floors `date` to the start of `unit` (UTC).
    #[must_use]
    pub fn start_of(&self, date: Instant, unit: TimeUnit) -> Instant {
        match unit {
            TimeUnit::Millisecond => date,
            TimeUnit::Second | TimeUnit::Minute | TimeUnit::Hour | TimeUnit::Day => {
                let millis = date.millis();
                Instant::from_millis(millis - millis.rem_euclid(unit.millis()))
            }
            TimeUnit::Month | TimeUnit::Year => {
                let time = date.to_datetime();
                let month = if unit == TimeUnit::Year { 1 } else { time.month() };
                NaiveDate::from_ymd_opt(time.year(), month, 1)
                    .and_then(|day| day.and_hms_opt(0, 0, 0))
                    .map_or(date, |start| Instant::from_datetime(start.and_utc()))
            }
        }
    }

    /// Calendar field of `date` for `unit`.
    ///
    /// Day is the 1-based day of month, month is 0-based.
    #[must_use]
    pub fn field(&self, date: Instant, unit: TimeUnit) -> i64 {
        let time = date.to_datetime();
        match unit {
            TimeUnit::Millisecond => date.millis().rem_euclid(1_000),
            TimeUnit::Second => i64::from(time.second()),
            TimeUnit::Minute => i64::from(time.minute()),
            TimeUnit::Hour => i64::from(time.hour()),
            TimeUnit::Day => i64::from(time.day()),
            TimeUnit::Month => i64::from(time.month0()),
            TimeUnit::Year => i64::from(time.year()),
        }
    }

    fn add_months(&self, date: Instant, amount: i64) -> Instant {
        if amount == 0 {
            return date;
        }

        let saturated = if amount > 0 {
            Instant::MAX
        } else {
            Instant::MIN
        };
        let time = date.to_datetime();
        let total = (i64::from(time.year()) * 12 + i64::from(time.month0())).saturating_add(amount);
        let Ok(year) = i32::try_from(total.div_euclid(12)) else {
            return saturated;
        };
        let month = total.rem_euclid(12) as u32 + 1;

        last_day_of_month(year, month)
            .and_then(|last_day| NaiveDate::from_ymd_opt(year, month, time.day().min(last_day)))
            .map(|day| day.and_time(time.time()).and_utc().timestamp_millis())
            .and_then(Instant::checked_from_millis)
            .unwrap_or(saturated)
    }

    fn format_datetime(
        &self,
        time: DateTime<Utc>,
        unit: Option<TimeUnit>,
        only_unit: bool,
    ) -> String {
        match unit {
            Some(TimeUnit::Millisecond) => {
                let millis = time.timestamp_subsec_millis();
                if only_unit {
                    format!("{millis}ms")
                } else {
                    let second = self.format_datetime(time, Some(TimeUnit::Second), false);
                    format!("{second}.{millis:03}")
                }
            }
            Some(TimeUnit::Second) => {
                if only_unit {
                    format!("{:02}s", time.second())
                } else {
                    let minute = self.format_datetime(time, Some(TimeUnit::Minute), false);
                    format!("{minute}:{:02}", time.second())
                }
            }
            Some(TimeUnit::Minute) => format!("{:02}:{:02}", time.hour(), time.minute()),
            Some(TimeUnit::Hour) => {
                if only_unit {
                    format!("{:02}:00", time.hour())
                } else {
                    format!("{:02}h", time.hour())
                }
            }
            Some(TimeUnit::Day) => {
                if only_unit {
                    format!("{:02}", time.day())
                } else {
                    let month = self.format_datetime(time, Some(TimeUnit::Month), false);
                    format!("{:02} {month}", time.day())
                }
            }
            Some(TimeUnit::Month) => {
                let label = self.config.locale.month_labels()[time.month0() as usize];
                if only_unit {
                    label.to_owned()
                } else {
                    let year = self.format_datetime(time, Some(TimeUnit::Year), false);
                    format!("{label} {year}")
                }
            }
            Some(TimeUnit::Year) => time.year().to_string(),
            None => {
                let min_unit = self.config.min_unit;
                let head_unit = if min_unit > TimeUnit::Day {
                    min_unit
                } else {
                    TimeUnit::Day
                };
                let mut label = self.format_datetime(time, Some(head_unit), false);
                if min_unit < TimeUnit::Day {
                    label.push_str(" - ");
                    label.push_str(&self.format_datetime(time, Some(min_unit), false));
                }
                label
            }
        }
    }
}

impl Calendar for GregorianCalendar {
    type Input = str;
    type Date = Instant;

    fn parse(&self, input: &str) -> TimelineResult<Instant> {
        let time = parse_datetime(input).ok_or_else(|| TimelineError::InvalidDate {
            input: input.to_owned(),
            reason: "unrecognized date format".to_owned(),
        })?;
        let instant = Instant::checked_from_millis(time.timestamp_millis()).ok_or_else(|| {
            TimelineError::InvalidDate {
                input: input.to_owned(),
                reason: "outside the supported time range".to_owned(),
            }
        })?;
        let floored = self.start_of(instant, self.config.min_unit);
        trace!(input, millis = floored.millis(), "parsed date");
        Ok(floored)
    }

    fn unparse(&self, date: Instant) -> String {
        date.to_datetime()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn minimum_duration(&self) -> i64 {
        self.config.min_unit.millis()
    }

    fn diff(&self, a: Instant, b: Instant) -> i64 {
        a.millis_since(b)
    }

    fn add(&self, date: Instant, amount: i64, unit: TimeUnit) -> Instant {
        match unit {
            TimeUnit::Millisecond | TimeUnit::Second | TimeUnit::Minute | TimeUnit::Hour => {
                date.saturating_add_millis(amount.saturating_mul(unit.millis()))
            }
            // UTC days have no DST transitions, so a calendar day is exactly 24h.
            TimeUnit::Day => date.saturating_add_millis(amount.saturating_mul(DAY_IN_MILLISECONDS)),
            TimeUnit::Month => self.add_months(date, amount),
            TimeUnit::Year => self.add_months(date, amount.saturating_mul(12)),
        }
    }

    fn format(&self, date: Instant, unit: Option<TimeUnit>, only_unit: bool) -> String {
        self.format_datetime(date.to_datetime(), unit, only_unit)
    }

    fn is_important_step(&self, step: &Step<Instant>) -> bool {
        if step.unit != TimeUnit::Year {
            return false;
        }
        let period = 10 * i64::from(step.scale);
        period != 0 && self.field(step.date, TimeUnit::Year) % period == 0
    }

    fn zoom_levels(&self) -> &[ZoomLevel] {
        &self.zoom_levels
    }

    fn steps(&self, level: &ZoomLevel, start: Instant, end: Instant) -> Vec<Step<Instant>> {
        generate_steps(self, level.unit, level.scale, start, end)
    }
}

fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(time) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(time.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(time.and_utc());
        }
    }

    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|time| time.and_utc());
    }

    parse_year_month(trimmed)
}

/// `YYYY` or `YYYY-MM`, with an optional leading sign on the year.
fn parse_year_month(input: &str) -> Option<DateTime<Utc>> {
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let mut parts = body.splitn(2, '-');
    let year_part = parts.next()?;
    if year_part.is_empty() || !year_part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year_part.parse().ok()?;
    let year = if negative { -year } else { year };

    let month = match parts.next() {
        None => 1,
        Some(part) if (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit()) => {
            part.parse().ok()?
        }
        Some(_) => return None,
    };

    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|time| time.and_utc())
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
}
