use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs::api::{StepMinWidth, ViewportController, build_step_labels, compute_step_levels};
use timeline_rs::core::row_packing::pack_rows;
use timeline_rs::core::{
    BoundingBox, Calendar, CalendarConfig, GregorianCalendar, RowPackerConfig, TimeUnit, Viewport,
};

fn second_calendar() -> GregorianCalendar {
    GregorianCalendar::new(CalendarConfig::default().with_units(TimeUnit::Second, TimeUnit::Year))
        .expect("valid calendar")
}

fn bench_step_levels_one_year(c: &mut Criterion) {
    let calendar = second_calendar();
    let start = calendar.parse("2021-01-01").expect("start");
    let end = calendar.parse("2022-01-01").expect("end");
    let viewport = Viewport::new(&calendar, start, end).expect("viewport");

    c.bench_function("step_levels_one_year_1920px", |b| {
        b.iter(|| {
            let levels = compute_step_levels(
                black_box(&calendar),
                black_box(&viewport),
                black_box(1_920.0),
                StepMinWidth::default(),
            );
            black_box(build_step_labels(&calendar, &levels));
        })
    });
}

fn bench_five_day_steps_ten_years(c: &mut Criterion) {
    let calendar = second_calendar();
    let start = calendar.parse("2015-01-01").expect("start");
    let end = calendar.parse("2025-01-01").expect("end");
    let level = calendar
        .zoom_levels()
        .iter()
        .find(|level| level.unit == TimeUnit::Day && level.scale == 5)
        .copied()
        .expect("five day level");

    c.bench_function("five_day_steps_ten_years", |b| {
        b.iter(|| black_box(calendar.steps(black_box(&level), start, end)))
    });
}

fn bench_pan_zoom_cycle(c: &mut Criterion) {
    let calendar = second_calendar();
    let controller = ViewportController::new(&calendar);
    let start = calendar.parse("2021-01-01").expect("start");
    let end = calendar.parse("2021-02-01").expect("end");
    let viewport = Viewport::new(&calendar, start, end).expect("viewport");

    c.bench_function("pan_zoom_cycle", |b| {
        b.iter(|| {
            let panned = controller
                .pan_by_pixels(black_box(&viewport), 120.0, 1_920.0)
                .expect("pan");
            let zoomed = controller.zoom(&panned, black_box(2.0)).expect("zoom");
            black_box(controller.zoom(&zoomed, -2.0).expect("zoom out"));
        })
    });
}

fn bench_pack_rows_2k(c: &mut Criterion) {
    let boxes: Vec<BoundingBox> = (0..2_000)
        .map(|i| {
            let left = f64::from(i % 400) * 12.5;
            BoundingBox::new(left, left + 40.0 + f64::from(i % 7) * 15.0, 18.0)
        })
        .collect();

    c.bench_function("pack_rows_2k", |b| {
        b.iter(|| black_box(pack_rows(black_box(&boxes), RowPackerConfig::default())))
    });
}

criterion_group!(
    benches,
    bench_step_levels_one_year,
    bench_five_day_steps_ten_years,
    bench_pan_zoom_cycle,
    bench_pack_rows_2k
);
criterion_main!(benches);
