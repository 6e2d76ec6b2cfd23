use tracing::warn;

use crate::core::calendar::Calendar;
use crate::core::gregorian::GregorianCalendar;
use crate::core::types::{Instant, Step};
use crate::core::units::TimeUnit;

/// Upper bound on boundaries produced for a single level.
pub const MAX_GENERATED_STEPS: usize = 100_000;

/// Generates ascending boundaries every `scale` units covering `[start, end]`.
///
/// The first boundary is aligned at/before `start`; the last one is the first
/// boundary at/after `end`, kept so the previous step's width can be derived.
///
/// Multi-day levels never anchor on the 30th/31st: those anchors roll over to
/// the 1st of the following month, and a step landing on the 1st advances by
/// `scale - 1` days so the sequence reads 1, 5, 10, ... within each month.
pub(crate) fn generate_steps(
    calendar: &GregorianCalendar,
    unit: TimeUnit,
    scale: u32,
    start: Instant,
    end: Instant,
) -> Vec<Step<Instant>> {
    let scale = scale.max(1);
    let n = i64::from(scale);
    let mut steps = Vec::new();

    let mut offset_units = calendar.field(start, unit);
    if unit == TimeUnit::Day {
        let back = if n > 1 && calendar.field(start, TimeUnit::Day) >= 30 {
            n
        } else {
            0
        };
        let corrected = calendar.subtract(start, back, TimeUnit::Day);
        let corrected_day = calendar.field(corrected, TimeUnit::Day);
        let modulo_day = i64::from(corrected_day < n);
        offset_units = corrected_day - modulo_day;
    }

    let mut date = calendar.subtract(
        calendar.start_of(start, unit),
        offset_units.rem_euclid(n),
        unit,
    );

    loop {
        let is_last = !calendar.is_before(date, end);
        steps.push(Step { date, unit, scale });
        if is_last {
            break;
        }
        if steps.len() >= MAX_GENERATED_STEPS {
            warn!(
                %unit,
                scale,
                limit = MAX_GENERATED_STEPS,
                "step generation truncated"
            );
            break;
        }

        let mut advance = n;
        if unit == TimeUnit::Day && n > 1 && calendar.field(date, TimeUnit::Day) == 1 {
            advance = n - 1;
        }
        let previous_month = calendar.field(date, TimeUnit::Month);
        let mut next = calendar.add(date, advance, unit);

        if unit == TimeUnit::Day {
            if n > 1 && calendar.field(next, TimeUnit::Day) >= 30 {
                next = calendar.add(next, 1, TimeUnit::Month);
            }
            if calendar.field(next, TimeUnit::Month) != previous_month {
                next = calendar.start_of(next, TimeUnit::Month);
            }
        }

        if next <= date {
            warn!(%unit, scale, "step generation stalled at the supported time range");
            break;
        }
        date = next;
    }

    steps
}
