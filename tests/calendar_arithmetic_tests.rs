use timeline_rs::core::units::{DAY_IN_MILLISECONDS, HOUR_IN_MILLISECONDS, MONTH_IN_MILLISECONDS};
use timeline_rs::core::{
    Calendar, CalendarConfig, DurationSpec, GregorianCalendar, Instant, TimeUnit,
};

fn parse(calendar: &GregorianCalendar, input: &str) -> Instant {
    calendar.parse(input).expect("valid date")
}

#[test]
fn month_addition_clamps_to_last_day() {
    let calendar = GregorianCalendar::default();

    let jan_31 = parse(&calendar, "2021-01-31T08:30:00Z");
    assert_eq!(
        calendar.unparse(calendar.add(jan_31, 1, TimeUnit::Month)),
        "2021-02-28T08:30:00.000Z"
    );

    let leap_jan_31 = parse(&calendar, "2020-01-31");
    assert_eq!(
        calendar.unparse(calendar.add(leap_jan_31, 1, TimeUnit::Month)),
        "2020-02-29T00:00:00.000Z"
    );

    let mar_31 = parse(&calendar, "2021-03-31");
    assert_eq!(
        calendar.unparse(calendar.subtract(mar_31, 1, TimeUnit::Month)),
        "2021-02-28T00:00:00.000Z"
    );
    assert_eq!(
        calendar.unparse(calendar.add(mar_31, -13, TimeUnit::Month)),
        "2020-02-29T00:00:00.000Z"
    );
}

#[test]
fn year_addition_is_twelve_months() {
    let calendar = GregorianCalendar::default();
    let leap_day = parse(&calendar, "2020-02-29");
    assert_eq!(
        calendar.unparse(calendar.add(leap_day, 1, TimeUnit::Year)),
        "2021-02-28T00:00:00.000Z"
    );
    assert_eq!(
        calendar.unparse(calendar.add(leap_day, 4, TimeUnit::Year)),
        "2024-02-29T00:00:00.000Z"
    );
}

#[test]
fn sub_day_and_day_units_are_linear() {
    let calendar = GregorianCalendar::default();
    let start = parse(&calendar, "2021-03-27T12:00:00Z");

    let next_day = calendar.add(start, 2, TimeUnit::Day);
    assert_eq!(calendar.diff(next_day, start), 2 * DAY_IN_MILLISECONDS);

    let earlier = calendar.subtract(start, 36, TimeUnit::Hour);
    assert_eq!(calendar.diff(earlier, start), -36 * HOUR_IN_MILLISECONDS);
    assert!(calendar.is_before(earlier, start));
    assert!(!calendar.is_before(start, start));
}

#[test]
fn arithmetic_saturates_at_supported_range() {
    let calendar = GregorianCalendar::default();
    assert_eq!(calendar.add(Instant::MAX, 1, TimeUnit::Year), Instant::MAX);
    assert_eq!(calendar.add(Instant::MAX, i64::MAX, TimeUnit::Millisecond), Instant::MAX);
    assert_eq!(calendar.subtract(Instant::MIN, 3, TimeUnit::Month), Instant::MIN);
    assert_eq!(calendar.add(Instant::MIN, i64::MIN, TimeUnit::Day), Instant::MIN);
}

#[test]
fn structured_durations_use_fixed_factors() {
    let calendar = GregorianCalendar::default();
    let spec = DurationSpec::new()
        .with(TimeUnit::Day, 2.0)
        .with(TimeUnit::Hour, 3.0);
    assert_eq!(
        calendar.parse_duration(&spec),
        2 * DAY_IN_MILLISECONDS + 3 * HOUR_IN_MILLISECONDS
    );
    assert_eq!(
        calendar.parse_duration(&DurationSpec::of(1.0, TimeUnit::Month)),
        MONTH_IN_MILLISECONDS
    );
    assert_eq!(
        calendar.parse_duration(&DurationSpec::of(1.6, TimeUnit::Millisecond)),
        2
    );
    assert_eq!(calendar.parse_duration(&DurationSpec::new()), 0);
}

#[test]
fn structured_duration_json_is_a_unit_map() {
    let spec: DurationSpec =
        serde_json::from_str(r#"{"day": 2, "hour": 3}"#).expect("duration json");
    assert_eq!(spec.count(TimeUnit::Day), 2.0);
    assert_eq!(spec.count(TimeUnit::Hour), 3.0);
    assert_eq!(spec.count(TimeUnit::Minute), 0.0);
}

#[test]
fn minimum_duration_is_one_minimum_unit() {
    assert_eq!(GregorianCalendar::default().minimum_duration(), 1);
    let seconds = GregorianCalendar::new(
        CalendarConfig::default().with_units(TimeUnit::Second, TimeUnit::Year),
    )
    .expect("calendar");
    assert_eq!(seconds.minimum_duration(), 1_000);
}

#[test]
fn zoom_catalogue_is_ascending_and_bounded_by_units() {
    let full = GregorianCalendar::default();
    assert_eq!(full.zoom_levels().len(), 33);
    for pair in full.zoom_levels().windows(2) {
        assert!(pair[0].threshold_ms < pair[1].threshold_ms);
    }

    let days_to_months = GregorianCalendar::new(
        CalendarConfig::default().with_units(TimeUnit::Day, TimeUnit::Month),
    )
    .expect("calendar");
    let units: Vec<(TimeUnit, u32)> = days_to_months
        .zoom_levels()
        .iter()
        .map(|level| (level.unit, level.scale))
        .collect();
    assert_eq!(
        units,
        vec![
            (TimeUnit::Day, 1),
            (TimeUnit::Day, 5),
            (TimeUnit::Day, 10),
            (TimeUnit::Month, 1),
            (TimeUnit::Month, 2),
            (TimeUnit::Month, 4),
            (TimeUnit::Month, 6),
        ]
    );
}

#[test]
fn steps_cover_the_window_with_a_trailing_boundary() {
    let calendar = GregorianCalendar::default();
    let start = parse(&calendar, "2021-01-01T10:20:00Z");
    let end = parse(&calendar, "2021-01-01T13:10:00Z");
    let level = calendar
        .zoom_levels()
        .iter()
        .find(|level| level.unit == TimeUnit::Hour && level.scale == 1)
        .copied()
        .expect("hour level");

    let steps = calendar.steps(&level, start, end);
    let labels: Vec<String> = steps
        .iter()
        .map(|step| calendar.format(step.date, Some(step.unit), true))
        .collect();
    assert_eq!(labels, vec!["10:00", "11:00", "12:00", "13:00", "14:00"]);
    assert!(steps.iter().all(|step| step.unit == TimeUnit::Hour && step.scale == 1));
}
