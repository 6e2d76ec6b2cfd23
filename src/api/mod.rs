mod axis_steps;
mod engine;
mod engine_config;
mod step_labels;
mod viewport_controller;

pub use axis_steps::{DEFAULT_STEP_MIN_WIDTH_PX, StepLevel, StepMinWidth, compute_step_levels};
pub use engine::TimelineEngine;
pub use engine_config::TimelineConfig;
pub use step_labels::{StepBar, StepLabel, build_step_bars, build_step_labels};
pub use viewport_controller::ViewportController;
