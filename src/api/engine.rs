use smallvec::SmallVec;
use tracing::debug;

use crate::core::interval::{self, PositionedInterval, ZeroWidthPolicy};
use crate::core::row_packing::{self, BoundingBox, PackedRows, RowPackerConfig};
use crate::core::{Calendar, DurationSpec, GregorianCalendar, Viewport, ViewportBounds};
use crate::error::{TimelineError, TimelineResult};

use super::engine_config::{validate_container_width, validate_row_packer_config};
use super::{
    StepBar, StepLabel, StepLevel, StepMinWidth, TimelineConfig, ViewportController,
    build_step_bars, build_step_labels, compute_step_levels,
};

/// Host-facing timeline state: a calendar, the visible window and the axis settings.
///
/// Mutating operations validate first and replace the whole viewport, so a
/// failed call leaves the previous state untouched.
#[derive(Debug, Clone)]
pub struct TimelineEngine<C: Calendar = GregorianCalendar> {
    calendar: C,
    viewport: Viewport<C::Date>,
    container_width_px: f64,
    step_min_width: StepMinWidth,
    row_packer: RowPackerConfig,
}

impl TimelineEngine<GregorianCalendar> {
    /// Builds the calendar and viewport described by `config`.
    pub fn from_config(config: &TimelineConfig) -> TimelineResult<Self> {
        let calendar = GregorianCalendar::new(config.calendar)?;

        let start = calendar.parse(&config.start)?;
        let end = calendar.parse(&config.end)?;
        let min_date = config
            .min_date
            .as_deref()
            .map(|input| calendar.parse(input))
            .transpose()?;
        let max_date = config
            .max_date
            .as_deref()
            .map(|input| calendar.parse(input))
            .transpose()?;
        let min_duration = parse_duration_bound(&calendar, config.min_duration.as_ref())?;
        let max_duration = parse_duration_bound(&calendar, config.max_duration.as_ref())?;

        let bounds = ViewportBounds::default()
            .with_dates(min_date, max_date)
            .with_durations(min_duration, max_duration);
        let viewport = Viewport::with_bounds(&calendar, start, end, bounds)?;

        let mut engine = Self::new(calendar, viewport);
        engine.set_container_width(config.container_width_px)?;
        engine.set_step_min_width(config.step_min_width);
        engine.set_row_packer_config(config.row_packer)?;
        debug!(start = %start, end = %end, "timeline engine built from config");
        Ok(engine)
    }
}

impl<C: Calendar> TimelineEngine<C> {
    #[must_use]
    pub fn new(calendar: C, viewport: Viewport<C::Date>) -> Self {
        Self {
            calendar,
            viewport,
            container_width_px: 0.0,
            step_min_width: StepMinWidth::default(),
            row_packer: RowPackerConfig::default(),
        }
    }

    #[must_use]
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport<C::Date> {
        &self.viewport
    }

    #[must_use]
    pub fn container_width_px(&self) -> f64 {
        self.container_width_px
    }

    #[must_use]
    pub fn step_min_width(&self) -> StepMinWidth {
        self.step_min_width
    }

    #[must_use]
    pub fn row_packer_config(&self) -> RowPackerConfig {
        self.row_packer
    }

    #[must_use]
    pub fn controller(&self) -> ViewportController<'_, C> {
        ViewportController::new(&self.calendar)
    }

    #[must_use]
    pub fn step_levels(&self) -> SmallVec<[StepLevel<C::Date>; 3]> {
        compute_step_levels(
            &self.calendar,
            &self.viewport,
            self.container_width_px,
            self.step_min_width,
        )
    }

    #[must_use]
    pub fn step_labels(&self) -> Vec<StepLabel<C::Date>> {
        build_step_labels(&self.calendar, &self.step_levels())
    }

    #[must_use]
    pub fn step_bars(&self) -> Vec<StepBar> {
        build_step_bars(&self.calendar, &self.step_levels())
    }

    pub fn position_period(
        &self,
        start: C::Date,
        end: C::Date,
    ) -> TimelineResult<Option<PositionedInterval>> {
        interval::position_interval(
            &self.calendar,
            start,
            end,
            &self.viewport,
            ZeroWidthPolicy::Reject,
        )
    }

    pub fn position_event(&self, date: C::Date) -> TimelineResult<Option<PositionedInterval>> {
        interval::position_event(&self.calendar, date, &self.viewport)
    }

    pub fn pan(&mut self, delta_ms: i64) -> TimelineResult<()> {
        self.viewport = self.controller().pan(&self.viewport, delta_ms)?;
        Ok(())
    }

    pub fn pan_by(&mut self, duration: &DurationSpec) -> TimelineResult<()> {
        self.viewport = self.controller().pan_by(&self.viewport, duration)?;
        Ok(())
    }

    /// Drag panning against the current container width.
    pub fn pan_by_pixels(&mut self, distance_px: f64) -> TimelineResult<()> {
        self.viewport =
            self.controller()
                .pan_by_pixels(&self.viewport, distance_px, self.container_width_px)?;
        Ok(())
    }

    pub fn zoom(&mut self, factor: f64) -> TimelineResult<()> {
        self.viewport = self.controller().zoom(&self.viewport, factor)?;
        Ok(())
    }

    /// Replaces the visible window, keeping the current bounds.
    pub fn set_visible_range(&mut self, start: C::Date, end: C::Date) -> TimelineResult<()> {
        self.viewport = Viewport::with_bounds(&self.calendar, start, end, *self.viewport.bounds())?;
        Ok(())
    }

    /// Replaces the bounds, keeping the current window.
    pub fn set_bounds(&mut self, bounds: ViewportBounds<C::Date>) -> TimelineResult<()> {
        self.viewport = Viewport::with_bounds(
            &self.calendar,
            self.viewport.start(),
            self.viewport.end(),
            bounds,
        )?;
        Ok(())
    }

    pub fn set_container_width(&mut self, container_width_px: f64) -> TimelineResult<()> {
        validate_container_width(container_width_px)?;
        self.container_width_px = container_width_px;
        Ok(())
    }

    pub fn set_step_min_width(&mut self, step_min_width: StepMinWidth) {
        self.step_min_width = step_min_width;
    }

    pub fn set_row_packer_config(&mut self, config: RowPackerConfig) -> TimelineResult<()> {
        validate_row_packer_config(config)?;
        self.row_packer = config;
        Ok(())
    }

    /// Date under a pixel of the container, e.g. for a hover cursor.
    pub fn date_at_pixel(&self, x_px: f64) -> TimelineResult<C::Date> {
        self.controller()
            .date_at_pixel(&self.viewport, x_px, self.container_width_px)
    }

    /// Label of the date under a pixel, using the calendar's composite format.
    pub fn label_at_pixel(&self, x_px: f64) -> TimelineResult<String> {
        let date = self.date_at_pixel(x_px)?;
        Ok(self.calendar.format(date, None, false))
    }

    #[must_use]
    pub fn pack_rows(&self, boxes: &[BoundingBox]) -> PackedRows {
        row_packing::pack_rows(boxes, self.row_packer)
    }

    #[must_use]
    pub fn pack_item_boxes<I>(&self, items: &[I]) -> PackedRows
    where
        I: AsRef<[BoundingBox]>,
    {
        row_packing::pack_item_boxes(items, self.row_packer)
    }
}

fn parse_duration_bound(
    calendar: &GregorianCalendar,
    duration: Option<&DurationSpec>,
) -> TimelineResult<Option<i64>> {
    let Some(duration) = duration else {
        return Ok(None);
    };
    duration.validate()?;
    if duration.is_empty() {
        return Err(TimelineError::InvalidConfig(
            "duration bound must name at least one unit".to_owned(),
        ));
    }
    Ok(Some(calendar.parse_duration(duration)))
}
