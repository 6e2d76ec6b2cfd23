use timeline_rs::TimelineError;
use timeline_rs::core::{
    Calendar, CalendarConfig, GregorianCalendar, Locale, Step, TimeUnit,
};

fn calendar_with(min_unit: TimeUnit, max_unit: TimeUnit) -> GregorianCalendar {
    GregorianCalendar::new(CalendarConfig::default().with_units(min_unit, max_unit))
        .expect("valid calendar")
}

#[test]
fn parses_supported_input_shapes_as_utc() {
    let calendar = GregorianCalendar::default();
    let cases = [
        ("2020-01-01T10:00:00+02:00", "2020-01-01T08:00:00.000Z"),
        ("2020-01-01T10:00:00Z", "2020-01-01T10:00:00.000Z"),
        ("2020-01-01T10:00:00", "2020-01-01T10:00:00.000Z"),
        ("2020-01-01 10:00:00.250", "2020-01-01T10:00:00.250Z"),
        ("2020-01-01T10:00", "2020-01-01T10:00:00.000Z"),
        ("2020-01-01", "2020-01-01T00:00:00.000Z"),
        ("2020-03", "2020-03-01T00:00:00.000Z"),
        ("2020", "2020-01-01T00:00:00.000Z"),
    ];

    for (input, expected) in cases {
        let date = calendar.parse(input).expect(input);
        assert_eq!(calendar.unparse(date), expected, "input {input}");
    }
}

#[test]
fn parse_floors_to_minimum_unit() {
    let by_day = calendar_with(TimeUnit::Day, TimeUnit::Year);
    let date = by_day.parse("2020-05-17T18:42:11.999Z").expect("parse");
    assert_eq!(by_day.unparse(date), "2020-05-17T00:00:00.000Z");

    let by_month = calendar_with(TimeUnit::Month, TimeUnit::Year);
    let date = by_month.parse("2020-05-17").expect("parse");
    assert_eq!(by_month.unparse(date), "2020-05-01T00:00:00.000Z");

    let by_second = calendar_with(TimeUnit::Second, TimeUnit::Year);
    let date = by_second.parse("2020-05-17T18:42:11.999Z").expect("parse");
    assert_eq!(by_second.unparse(date), "2020-05-17T18:42:11.000Z");
}

#[test]
fn rejects_unparseable_input() {
    let calendar = GregorianCalendar::default();
    for input in ["", "yesterday", "2020-13-01", "2020-02-30", "20-20"] {
        assert!(
            matches!(calendar.parse(input), Err(TimelineError::InvalidDate { .. })),
            "input {input:?} should be rejected"
        );
    }
}

#[test]
fn unparse_round_trips_through_parse() {
    let calendar = GregorianCalendar::default();
    let date = calendar.parse("1969-07-20T20:17:40.123Z").expect("parse");
    let text = calendar.unparse(date);
    assert_eq!(calendar.parse(&text).expect("reparse"), date);
}

#[test]
fn formats_each_unit_alone_and_with_context() {
    let calendar = GregorianCalendar::default();
    let date = calendar.parse("2021-03-05T14:07:09.250Z").expect("parse");

    let cases = [
        (TimeUnit::Millisecond, "250ms", "14:07:09.250"),
        (TimeUnit::Second, "09s", "14:07:09"),
        (TimeUnit::Minute, "14:07", "14:07"),
        (TimeUnit::Hour, "14:00", "14h"),
        (TimeUnit::Day, "05", "05 Mar 2021"),
        (TimeUnit::Month, "Mar", "Mar 2021"),
        (TimeUnit::Year, "2021", "2021"),
    ];

    for (unit, alone, with_context) in cases {
        assert_eq!(calendar.format(date, Some(unit), true), alone, "{unit} alone");
        assert_eq!(
            calendar.format(date, Some(unit), false),
            with_context,
            "{unit} with context"
        );
    }
}

#[test]
fn composite_format_follows_minimum_unit() {
    let fine = GregorianCalendar::default();
    let date = fine.parse("2021-03-05T14:07:09.250Z").expect("parse");
    assert_eq!(fine.format(date, None, false), "05 Mar 2021 - 14:07:09.250");

    let minutes = calendar_with(TimeUnit::Minute, TimeUnit::Year);
    let date = minutes.parse("2021-03-05T14:07:09Z").expect("parse");
    assert_eq!(minutes.format(date, None, false), "05 Mar 2021 - 14:07");

    let days = calendar_with(TimeUnit::Day, TimeUnit::Year);
    let date = days.parse("2021-03-05").expect("parse");
    assert_eq!(days.format(date, None, false), "05 Mar 2021");

    let months = calendar_with(TimeUnit::Month, TimeUnit::Year);
    let date = months.parse("2021-03").expect("parse");
    assert_eq!(months.format(date, None, false), "Mar 2021");
}

#[test]
fn french_locale_uses_abbreviated_month_names() {
    let calendar = GregorianCalendar::from_parts("fr-FR", TimeUnit::Day, TimeUnit::Year)
        .expect("french calendar");
    assert_eq!(calendar.config().locale, Locale::Fr);

    let february = calendar.parse("2021-02-14").expect("parse");
    assert_eq!(calendar.format(february, Some(TimeUnit::Month), false), "févr. 2021");
    let august = calendar.parse("2021-08-01").expect("parse");
    assert_eq!(calendar.format(august, Some(TimeUnit::Day), false), "01 août 2021");
}

#[test]
fn rejects_unknown_locale_and_inverted_units() {
    assert!(matches!(
        GregorianCalendar::from_parts("de", TimeUnit::Day, TimeUnit::Year),
        Err(TimelineError::UnsupportedLocale(_))
    ));
    assert!(matches!(
        GregorianCalendar::new(CalendarConfig::default().with_units(TimeUnit::Year, TimeUnit::Day)),
        Err(TimelineError::InvalidConfig(_))
    ));
}

#[test]
fn decades_are_important_year_steps() {
    let calendar = GregorianCalendar::default();
    let step = |input: &str, unit: TimeUnit, scale: u32| Step {
        date: calendar.parse(input).expect("parse"),
        unit,
        scale,
    };

    assert!(calendar.is_important_step(&step("2020", TimeUnit::Year, 1)));
    assert!(!calendar.is_important_step(&step("2021", TimeUnit::Year, 1)));
    assert!(calendar.is_important_step(&step("2050", TimeUnit::Year, 5)));
    assert!(!calendar.is_important_step(&step("2020", TimeUnit::Year, 5)));
    assert!(!calendar.is_important_step(&step("2020", TimeUnit::Month, 1)));
}
