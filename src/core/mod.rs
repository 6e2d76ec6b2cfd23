pub mod calendar;
pub mod gregorian;
pub mod interval;
pub mod row_packing;
pub mod step_generation;
pub mod types;
pub mod units;
pub mod viewport;
pub mod zoom_levels;

pub use calendar::{Calendar, CalendarConfig, Locale, ZoomLevel};
pub use gregorian::GregorianCalendar;
pub use interval::{IntervalPosition, PositionedInterval, ZeroWidthPolicy};
pub use row_packing::{BoundingBox, PackedRows, RowHeightMode, RowPackerConfig, RowPlacement};
pub use types::{DisplayStep, Instant, Step};
pub use units::{DurationSpec, TimeUnit};
pub use viewport::{Viewport, ViewportBounds};
