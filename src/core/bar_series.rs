use serde::{Deserialize, Serialize};

use crate::core::{CategoricalBar, DomainBaseline, LinearScale, PlotRect, ValueDomain};

/// Gap between sub-bars inside one category slot.
pub const DEFAULT_BAR_SPACING_PX: f64 = 4.0;
/// Gap between neighbouring category slots.
pub const DEFAULT_GROUP_SPACING_PX: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarMode {
    Single,
    Grouped,
    Stacked,
}

/// Which pixel axis carries values. Everything else about bar layout is
/// orientation independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarOrientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSpacing {
    pub bar_spacing_px: f64,
    pub group_spacing_px: f64,
}

impl Default for BarSpacing {
    fn default() -> Self {
        Self {
            bar_spacing_px: DEFAULT_BAR_SPACING_PX,
            group_spacing_px: DEFAULT_GROUP_SPACING_PX,
        }
    }
}

/// One rendered rectangle. In stacked mode `value_start..value_end` is the
/// cumulative range the segment covers; otherwise it starts at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub category_index: usize,
    pub group_index: Option<usize>,
    pub value: f64,
    pub value_start: f64,
    pub value_end: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Where a value label sits: the outer end of a bar (or of a whole stack).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarValueAnchor {
    pub category_index: usize,
    pub group_index: Option<usize>,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarProjection {
    pub domain: ValueDomain,
    pub orientation: BarOrientation,
    pub rects: Vec<BarRect>,
    /// Center of each category slot along the category axis, in pixels.
    pub category_centers: Vec<f64>,
    pub value_anchors: Vec<BarValueAnchor>,
}

/// Value each category contributes to the shared domain: the bar value,
/// the tallest group, or the stack total.
#[must_use]
pub fn bar_extent_value(bar: &CategoricalBar, mode: BarMode) -> f64 {
    match mode {
        BarMode::Single => bar.value,
        BarMode::Grouped => bar.grouped_max(),
        BarMode::Stacked => bar.stacked_total(),
    }
}

#[must_use]
pub fn bar_domain(bars: &[CategoricalBar], mode: BarMode) -> ValueDomain {
    ValueDomain::from_values(
        bars.iter().map(|bar| bar_extent_value(bar, mode)),
        DomainBaseline::ZeroFloor,
    )
}

/// Slot geometry in orientation-free terms: offsets along the category axis
/// and lengths along the value axis, both measured from the plot origin.
#[derive(Debug, Clone, Copy)]
struct BandSlot {
    category_offset: f64,
    category_width: f64,
    value_from: f64,
    value_to: f64,
}

struct BarAxes {
    orientation: BarOrientation,
    plot: PlotRect,
    length: LinearScale,
    domain: ValueDomain,
}

impl BarAxes {
    fn new(orientation: BarOrientation, plot: PlotRect, domain: ValueDomain) -> Self {
        let value_extent = match orientation {
            BarOrientation::Vertical => plot.height,
            BarOrientation::Horizontal => plot.width,
        };
        Self {
            orientation,
            plot,
            length: LinearScale::widened(domain.min, domain.max, 0.0, value_extent),
            domain,
        }
    }

    fn category_extent(&self) -> f64 {
        match self.orientation {
            BarOrientation::Vertical => self.plot.width,
            BarOrientation::Horizontal => self.plot.height,
        }
    }

    fn value_length(&self, value: f64) -> f64 {
        let value = if value.is_finite() { value } else { 0.0 };
        self.length.map(self.domain.clamp(value))
    }

    fn category_pixel(&self, offset: f64) -> f64 {
        match self.orientation {
            BarOrientation::Vertical => self.plot.left + offset,
            BarOrientation::Horizontal => self.plot.top + offset,
        }
    }

    /// The single place where orientation turns abstract slots into pixels.
    fn orient(&self, slot: BandSlot) -> (f64, f64, f64, f64) {
        let thickness = (slot.value_to - slot.value_from).max(0.0);
        match self.orientation {
            BarOrientation::Vertical => (
                self.plot.left + slot.category_offset,
                self.plot.bottom() - slot.value_to,
                slot.category_width,
                thickness,
            ),
            BarOrientation::Horizontal => (
                self.plot.left + slot.value_from,
                self.plot.top + slot.category_offset,
                thickness,
                slot.category_width,
            ),
        }
    }

    fn value_anchor(&self, center_offset: f64, length: f64) -> (f64, f64) {
        match self.orientation {
            BarOrientation::Vertical => (
                self.category_pixel(center_offset),
                self.plot.bottom() - length,
            ),
            BarOrientation::Horizontal => (
                self.plot.left + length,
                self.category_pixel(center_offset),
            ),
        }
    }
}

/// Splits `extent` into `count` equal slots separated by `spacing`.
///
/// When the gaps would eat the whole extent they collapse to zero so every
/// slot keeps a positive width.
fn divide(extent: f64, count: usize, spacing: f64) -> (f64, f64) {
    if count == 0 {
        return (0.0, 0.0);
    }
    let gaps = (count - 1) as f64;
    let spacing = if spacing.is_finite() { spacing.max(0.0) } else { 0.0 };
    let width = (extent - spacing * gaps) / count as f64;
    if width >= 1.0 || gaps == 0.0 {
        (width.max(0.0), spacing)
    } else {
        ((extent / count as f64).max(0.0), 0.0)
    }
}

/// Projects categorical bars into rectangles for the given mode and
/// orientation, against a shared `domain`.
///
/// Malformed input never fails: a category with an empty group list renders
/// as one zero-length bar, negative or non-finite values collapse onto the
/// zero floor.
#[must_use]
pub fn project_bars(
    bars: &[CategoricalBar],
    mode: BarMode,
    orientation: BarOrientation,
    plot: PlotRect,
    domain: ValueDomain,
    spacing: BarSpacing,
) -> BarProjection {
    let axes = BarAxes::new(orientation, plot, domain);
    let (slot_width, group_gap) = divide(
        axes.category_extent(),
        bars.len(),
        spacing.group_spacing_px,
    );

    let mut projection = BarProjection {
        domain,
        orientation,
        rects: Vec::new(),
        category_centers: Vec::with_capacity(bars.len()),
        value_anchors: Vec::new(),
    };

    for (category_index, bar) in bars.iter().enumerate() {
        let slot_offset = category_index as f64 * (slot_width + group_gap);
        let slot_center = slot_offset + slot_width * 0.5;
        projection
            .category_centers
            .push(axes.category_pixel(slot_center));

        let zero = axes.value_length(0.0);
        let mut push = |group_index: Option<usize>,
                        value: f64,
                        value_start: f64,
                        value_end: f64,
                        offset: f64,
                        width: f64| {
            let (x, y, width, height) = axes.orient(BandSlot {
                category_offset: offset,
                category_width: width,
                value_from: axes.value_length(value_start),
                value_to: axes.value_length(value_end),
            });
            projection.rects.push(BarRect {
                category_index,
                group_index,
                value,
                value_start,
                value_end,
                x,
                y,
                width,
                height,
            });
        };

        match mode {
            BarMode::Single => {
                push(None, bar.value, 0.0, bar.value, slot_offset, slot_width);
                let (x, y) =
                    axes.value_anchor(slot_center, axes.value_length(bar.value).max(zero));
                projection.value_anchors.push(BarValueAnchor {
                    category_index,
                    group_index: None,
                    value: bar.value,
                    x,
                    y,
                });
            }
            BarMode::Grouped => {
                let groups = bar.groups();
                if groups.is_empty() {
                    push(None, 0.0, 0.0, 0.0, slot_offset, slot_width);
                    continue;
                }
                let (sub_width, sub_gap) =
                    divide(slot_width, groups.len(), spacing.bar_spacing_px);
                for (group_index, value) in groups.iter().copied().enumerate() {
                    let offset = slot_offset + group_index as f64 * (sub_width + sub_gap);
                    push(Some(group_index), value, 0.0, value, offset, sub_width);
                    let (x, y) = axes.value_anchor(
                        offset + sub_width * 0.5,
                        axes.value_length(value).max(zero),
                    );
                    projection.value_anchors.push(BarValueAnchor {
                        category_index,
                        group_index: Some(group_index),
                        value,
                        x,
                        y,
                    });
                }
            }
            BarMode::Stacked => {
                let groups = bar.groups();
                if groups.is_empty() {
                    push(None, 0.0, 0.0, 0.0, slot_offset, slot_width);
                    continue;
                }
                let mut cumulative = 0.0;
                for (group_index, value) in groups.iter().copied().enumerate() {
                    let contribution = if value.is_finite() {
                        value.max(0.0)
                    } else {
                        0.0
                    };
                    let start = cumulative;
                    cumulative += contribution;
                    push(Some(group_index), value, start, cumulative, slot_offset, slot_width);
                }
                let (x, y) = axes.value_anchor(slot_center, axes.value_length(cumulative));
                projection.value_anchors.push(BarValueAnchor {
                    category_index,
                    group_index: None,
                    value: cumulative,
                    x,
                    y,
                });
            }
        }
    }

    projection
}
