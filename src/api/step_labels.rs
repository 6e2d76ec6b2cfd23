use serde::Serialize;

use crate::core::{Calendar, TimeUnit};

use super::StepLevel;

/// Text and geometry of one axis label, in percent of the viewport width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepLabel<D> {
    pub date: D,
    pub unit: TimeUnit,
    pub scale: u32,
    pub level_index: usize,
    pub text: String,
    pub left_percent: f64,
    pub width_percent: f64,
    pub important: bool,
}

/// A vertical grid line at a step boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepBar {
    pub level_index: usize,
    pub offset_percent: f64,
    pub important: bool,
}

/// Builds one label per display step.
///
/// Main-level labels show only their own unit and keep raw geometry; secondary
/// labels carry the coarser context and are cropped to the visible `[0, 100]`.
#[must_use]
pub fn build_step_labels<C>(calendar: &C, levels: &[StepLevel<C::Date>]) -> Vec<StepLabel<C::Date>>
where
    C: Calendar + ?Sized,
{
    levels
        .iter()
        .enumerate()
        .flat_map(|(level_index, level)| {
            level.steps.iter().map(move |step| {
                let mut left_percent = step.offset_percent;
                let mut width_percent = step.size_percent;
                if level_index > 0 {
                    if step.offset_percent < 0.0 {
                        left_percent = 0.0;
                        width_percent += step.offset_percent;
                    }
                    let overflow = step.end_percent() - 100.0;
                    if overflow > 0.0 {
                        width_percent -= overflow;
                    }
                }

                StepLabel {
                    date: step.date,
                    unit: step.unit,
                    scale: step.scale,
                    level_index,
                    text: calendar.format(step.date, Some(step.unit), level_index == 0),
                    left_percent,
                    width_percent,
                    important: calendar.is_important_step(&step.step()),
                }
            })
        })
        .collect()
}

/// Grid lines for every step boundary inside `(0, 100]`, all levels.
#[must_use]
pub fn build_step_bars<C>(calendar: &C, levels: &[StepLevel<C::Date>]) -> Vec<StepBar>
where
    C: Calendar + ?Sized,
{
    levels
        .iter()
        .enumerate()
        .flat_map(|(level_index, level)| {
            level
                .steps
                .iter()
                .filter(|step| step.offset_percent > 0.0 && step.offset_percent <= 100.0)
                .map(move |step| StepBar {
                    level_index,
                    offset_percent: step.offset_percent,
                    important: calendar.is_important_step(&step.step()),
                })
        })
        .collect()
}
