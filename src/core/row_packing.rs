use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default horizontal breathing room added on both sides of every item, in pixels.
pub const DEFAULT_HORIZONTAL_MARGIN_PX: f64 = 2.0;
/// Default vertical gap between two packed lines, in pixels.
pub const DEFAULT_VERTICAL_MARGIN_PX: f64 = 20.0;

/// Externally measured geometry of one rendered item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(left: f64, right: f64, height: f64) -> Self {
        Self {
            left,
            right,
            height,
        }
    }

    /// Smallest box enclosing all `boxes` (min left, max right, max height).
    #[must_use]
    pub fn enclosing(boxes: &[BoundingBox]) -> Option<Self> {
        let (first, rest) = boxes.split_first()?;
        Some(rest.iter().fold(*first, |acc, item| Self {
            left: acc.left.min(item.left),
            right: acc.right.max(item.right),
            height: acc.height.max(item.height),
        }))
    }

    #[must_use]
    pub fn widened(self, margin: f64) -> Self {
        Self {
            left: self.left - margin,
            right: self.right + margin,
            height: self.height,
        }
    }

    /// Closed-interval overlap: touching edges overlap.
    #[must_use]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.left <= other.right && other.left <= self.right
    }
}

/// How the row's own height is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RowHeightMode {
    /// Height is derived from the packed lines.
    #[default]
    Auto,
    /// The host keeps a fixed height; only offsets are computed.
    Fixed,
    /// The row fills its container; only offsets are computed.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowPackerConfig {
    #[serde(default = "default_horizontal_margin_px")]
    pub horizontal_margin_px: f64,
    #[serde(default = "default_vertical_margin_px")]
    pub vertical_margin_px: f64,
    #[serde(default)]
    pub height_mode: RowHeightMode,
}

impl Default for RowPackerConfig {
    fn default() -> Self {
        Self {
            horizontal_margin_px: default_horizontal_margin_px(),
            vertical_margin_px: default_vertical_margin_px(),
            height_mode: RowHeightMode::default(),
        }
    }
}

fn default_horizontal_margin_px() -> f64 {
    DEFAULT_HORIZONTAL_MARGIN_PX
}

fn default_vertical_margin_px() -> f64 {
    DEFAULT_VERTICAL_MARGIN_PX
}

/// Items sharing one vertical line.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Line {
    intervals: Vec<BoundingBox>,
    max_height: f64,
}

impl Line {
    #[must_use]
    pub fn intervals(&self) -> &[BoundingBox] {
        &self.intervals
    }

    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    fn accepts(&self, candidate: &BoundingBox) -> bool {
        !self
            .intervals
            .iter()
            .any(|placed| placed.overlaps(candidate))
    }

    fn push(&mut self, interval: BoundingBox) {
        self.max_height = self.max_height.max(interval.height);
        self.intervals.push(interval);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowPlacement {
    pub line_index: usize,
    pub top_offset: f64,
}

/// Packing result; `placements` follows input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackedRows {
    pub placements: Vec<RowPlacement>,
    pub lines: Vec<Line>,
    /// Total height, `None` when the row height is fixed or full.
    pub height: Option<f64>,
}

impl PackedRows {
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Top offset of `line_index`: one vertical margin per previous line plus their heights.
    #[must_use]
    pub fn line_top(&self, line_index: usize, vertical_margin_px: f64) -> f64 {
        line_top(&self.lines, line_index, vertical_margin_px)
    }
}

/// Greedy first-fit packing of boxes into non-overlapping lines, in input order.
///
/// Reordering the input changes the result; that order is the determinism contract.
#[must_use]
pub fn pack_rows(items: &[BoundingBox], config: RowPackerConfig) -> PackedRows {
    let mut lines = vec![Line::default()];
    let mut line_indexes = Vec::with_capacity(items.len());

    for item in items {
        let interval = item.widened(config.horizontal_margin_px);
        line_indexes.push(place(&mut lines, interval));
    }

    finish(lines, line_indexes, config)
}

/// Packs items made of several measured boxes each (bar, label, container).
///
/// Every item is reduced to its enclosing box first. Items without any box are
/// placed on line 0 at offset 0 and do not occupy space.
#[must_use]
pub fn pack_item_boxes<I>(items: &[I], config: RowPackerConfig) -> PackedRows
where
    I: AsRef<[BoundingBox]>,
{
    let mut lines = vec![Line::default()];
    let mut line_indexes = Vec::with_capacity(items.len());

    for item in items {
        let Some(enclosing) = BoundingBox::enclosing(item.as_ref()) else {
            line_indexes.push(0);
            continue;
        };
        let interval = enclosing.widened(config.horizontal_margin_px);
        line_indexes.push(place(&mut lines, interval));
    }

    finish(lines, line_indexes, config)
}

/// First line accepting `interval`, or a new one appended below the others.
fn place(lines: &mut Vec<Line>, interval: BoundingBox) -> usize {
    let line_index = match lines.iter().position(|line| line.accepts(&interval)) {
        Some(index) => index,
        None => {
            lines.push(Line::default());
            lines.len() - 1
        }
    };
    lines[line_index].push(interval);
    line_index
}

fn finish(lines: Vec<Line>, line_indexes: Vec<usize>, config: RowPackerConfig) -> PackedRows {
    let placements = line_indexes
        .into_iter()
        .map(|line_index| RowPlacement {
            line_index,
            top_offset: line_top(&lines, line_index, config.vertical_margin_px),
        })
        .collect();

    let height = match config.height_mode {
        RowHeightMode::Auto => {
            let gaps = lines.len().saturating_sub(1) as f64;
            let content: f64 = lines.iter().map(Line::max_height).sum();
            Some(config.vertical_margin_px * gaps + content)
        }
        RowHeightMode::Fixed | RowHeightMode::Full => None,
    };

    debug!(lines = lines.len(), ?height, "packed timeline row");

    PackedRows {
        placements,
        lines,
        height,
    }
}

fn line_top(lines: &[Line], line_index: usize, vertical_margin_px: f64) -> f64 {
    let above: f64 = lines.iter().take(line_index).map(Line::max_height).sum();
    vertical_margin_px * line_index as f64 + above
}

#[cfg(test)]
mod tests {
    use super::{BoundingBox, RowPackerConfig, pack_rows};

    #[test]
    fn touching_boxes_overlap() {
        let a = BoundingBox::new(0.0, 10.0, 1.0);
        let b = BoundingBox::new(10.0, 20.0, 1.0);
        let c = BoundingBox::new(10.5, 20.0, 1.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn enclosing_box_takes_extremes() {
        let boxes = [
            BoundingBox::new(5.0, 30.0, 12.0),
            BoundingBox::new(0.0, 20.0, 18.0),
            BoundingBox::new(8.0, 42.0, 4.0),
        ];
        assert_eq!(
            BoundingBox::enclosing(&boxes),
            Some(BoundingBox::new(0.0, 42.0, 18.0))
        );
        assert_eq!(BoundingBox::enclosing(&[]), None);
    }

    #[test]
    fn empty_input_keeps_single_empty_line() {
        let packed = pack_rows(&[], RowPackerConfig::default());
        assert_eq!(packed.line_count(), 1);
        assert!(packed.placements.is_empty());
        assert_eq!(packed.height, Some(0.0));
    }
}
