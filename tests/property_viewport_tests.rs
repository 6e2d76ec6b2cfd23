use proptest::prelude::*;
use timeline_rs::api::ViewportController;
use timeline_rs::core::interval::position_interval;
use timeline_rs::core::{
    GregorianCalendar, Instant, IntervalPosition, Viewport, ViewportBounds, ZeroWidthPolicy,
};

const SPAN_LIMIT_MS: i64 = 10_000_000_000_000;

proptest! {
    #[test]
    fn pan_round_trip_restores_unbounded_viewport(
        start_ms in -SPAN_LIMIT_MS..SPAN_LIMIT_MS,
        duration_ms in 1i64..1_000_000_000_000,
        delta_ms in -SPAN_LIMIT_MS..SPAN_LIMIT_MS
    ) {
        let calendar = GregorianCalendar::default();
        let controller = ViewportController::new(&calendar);
        let start = Instant::from_millis(start_ms);
        let viewport = Viewport::new(&calendar, start, Instant::from_millis(start_ms + duration_ms))
            .expect("viewport");

        let panned = controller.pan(&viewport, delta_ms).expect("pan");
        prop_assert_eq!(panned.duration(&calendar), duration_ms);

        let unit_zoom = controller.zoom(&panned, 1.0).expect("unit zoom");
        prop_assert_eq!(unit_zoom.duration(&calendar), duration_ms);

        let restored = controller.pan(&panned, -delta_ms).expect("pan back");
        prop_assert_eq!(restored, viewport);
    }

    #[test]
    fn pan_and_zoom_stay_inside_date_bounds(
        min_ms in -SPAN_LIMIT_MS..SPAN_LIMIT_MS,
        bounds_span_ms in 1_000i64..1_000_000_000_000,
        window_ratio in 0.01f64..1.0,
        window_offset_ratio in 0.0f64..1.0,
        delta_ms in -2_000_000_000_000i64..2_000_000_000_000,
        zoom_factor in prop_oneof![-8.0f64..-1.0, 1.0f64..8.0]
    ) {
        let calendar = GregorianCalendar::default();
        let controller = ViewportController::new(&calendar);
        let min_date = Instant::from_millis(min_ms);
        let max_date = Instant::from_millis(min_ms + bounds_span_ms);

        let window_ms = ((bounds_span_ms as f64 * window_ratio) as i64).max(1);
        let slack_ms = bounds_span_ms - window_ms;
        let start_ms = min_ms + (slack_ms as f64 * window_offset_ratio) as i64;
        let bounds = ViewportBounds::default().with_dates(Some(min_date), Some(max_date));
        let viewport = Viewport::with_bounds(
            &calendar,
            Instant::from_millis(start_ms),
            Instant::from_millis(start_ms + window_ms),
            bounds,
        )
        .expect("viewport inside bounds");

        for moved in [
            controller.pan(&viewport, delta_ms).expect("pan"),
            controller.zoom(&viewport, zoom_factor).expect("zoom"),
        ] {
            prop_assert!(moved.start() >= min_date);
            prop_assert!(moved.end() <= max_date);
            prop_assert!(moved.start() < moved.end());
        }
    }

    #[test]
    fn viewport_sized_interval_is_inside(
        start_ms in -SPAN_LIMIT_MS..SPAN_LIMIT_MS,
        duration_ms in 1i64..1_000_000_000_000
    ) {
        let calendar = GregorianCalendar::default();
        let start = Instant::from_millis(start_ms);
        let end = Instant::from_millis(start_ms + duration_ms);
        let viewport = Viewport::new(&calendar, start, end).expect("viewport");

        let placed = position_interval(&calendar, start, end, &viewport, ZeroWidthPolicy::Reject)
            .expect("valid interval")
            .expect("visible");
        prop_assert_eq!(placed.offset_percent, 0.0);
        prop_assert!((placed.width_percent - 100.0).abs() <= 1e-9);
        prop_assert_eq!(placed.position, IntervalPosition::Inside);
    }
}
