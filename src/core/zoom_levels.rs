use crate::core::calendar::ZoomLevel;
use crate::core::units::TimeUnit;

const NEVER: &[TimeUnit] = &[];
const FOR_MILLISECOND: &[TimeUnit] = &[TimeUnit::Millisecond];
const FOR_SECOND: &[TimeUnit] = &[TimeUnit::Second];
const FOR_MINUTE: &[TimeUnit] = &[TimeUnit::Minute];
const FOR_SUB_DAY: &[TimeUnit] = &[
    TimeUnit::Hour,
    TimeUnit::Minute,
    TimeUnit::Second,
    TimeUnit::Millisecond,
];
const FOR_DAY: &[TimeUnit] = &[TimeUnit::Day];
const FOR_MONTH: &[TimeUnit] = &[TimeUnit::Month];

/// Builds the zoom catalogue for units in `[min_unit, max_unit]`.
///
/// Entries are ascending by threshold. Only the first level of each unit
/// declares a major relation, which decides the secondary label row.
#[must_use]
pub fn build_zoom_levels(min_unit: TimeUnit, max_unit: TimeUnit) -> Vec<ZoomLevel> {
    let mut levels = Vec::with_capacity(35);
    let enabled = |unit: TimeUnit| min_unit <= unit && unit <= max_unit;

    if enabled(TimeUnit::Millisecond) {
        for scale in [1, 100, 500] {
            levels.push(ZoomLevel::new(TimeUnit::Millisecond, scale, NEVER));
        }
    }

    if enabled(TimeUnit::Second) {
        levels.push(ZoomLevel::new(TimeUnit::Second, 1, FOR_MILLISECOND));
        for scale in [5, 10, 30] {
            levels.push(ZoomLevel::new(TimeUnit::Second, scale, NEVER));
        }
    }

    if enabled(TimeUnit::Minute) {
        levels.push(ZoomLevel::new(TimeUnit::Minute, 1, FOR_SECOND));
        for scale in [5, 10, 30] {
            levels.push(ZoomLevel::new(TimeUnit::Minute, scale, NEVER));
        }
    }

    if enabled(TimeUnit::Hour) {
        levels.push(ZoomLevel::new(TimeUnit::Hour, 1, FOR_MINUTE));
        for scale in [3, 6] {
            levels.push(ZoomLevel::new(TimeUnit::Hour, scale, NEVER));
        }
    }

    if enabled(TimeUnit::Day) {
        levels.push(ZoomLevel::new(TimeUnit::Day, 1, FOR_SUB_DAY));
        for scale in [5, 10] {
            levels.push(ZoomLevel::new(TimeUnit::Day, scale, NEVER));
        }
    }

    if enabled(TimeUnit::Month) {
        for scale in [1, 2, 4, 6] {
            let major_for = if scale == 1 { FOR_DAY } else { NEVER };
            levels.push(ZoomLevel::new(TimeUnit::Month, scale, major_for));
        }
    }

    if enabled(TimeUnit::Year) {
        for base in [1, 10, 100, 1000] {
            let major_for = if base == 1 { FOR_MONTH } else { NEVER };
            levels.push(ZoomLevel::new(TimeUnit::Year, base, major_for));
            levels.push(ZoomLevel::new(TimeUnit::Year, 2 * base, NEVER));
            levels.push(ZoomLevel::new(TimeUnit::Year, 5 * base, NEVER));
        }
    }

    levels
}
