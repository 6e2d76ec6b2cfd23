//! timeline-rs: computational core of a zoomable, pannable time axis.
//!
//! The crate turns dates into axis positions: it generates multi-level tick
//! rows, places periods and events on the visible window, applies pan/zoom
//! with bounds, and packs measured item boxes into non-overlapping lines.
//! Rendering and input handling stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
