use serde::{Deserialize, Serialize};

use crate::core::PlotRect;
use crate::error::{ChartError, ChartResult};

use super::HitTarget;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipLayout {
    /// Horizontal gap between the anchor and the tooltip's right edge.
    pub offset_x_px: f64,
    /// Vertical gap between the anchor and the tooltip's bottom edge.
    pub offset_y_px: f64,
    pub padding_px: f64,
    pub font_size_px: f64,
    pub line_height_px: f64,
}

impl Default for TooltipLayout {
    fn default() -> Self {
        Self {
            offset_x_px: 8.0,
            offset_y_px: 8.0,
            padding_px: 6.0,
            font_size_px: 11.0,
            line_height_px: 15.0,
        }
    }
}

impl TooltipLayout {
    /// Rejects layouts that would paint an invalid tooltip box or text once
    /// a primitive is selected.
    pub fn validate(self) -> ChartResult<()> {
        for (name, size) in [
            ("tooltip font size", self.font_size_px),
            ("tooltip line height", self.line_height_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, gap) in [
            ("tooltip x offset", self.offset_x_px),
            ("tooltip y offset", self.offset_y_px),
            ("tooltip padding", self.padding_px),
        ] {
            if !gap.is_finite() || gap < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Placed tooltip for the selected primitive. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipAnchor {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub target: HitTarget,
    pub lines: Vec<String>,
}

/// Positions a `width x height` box above-left of `(anchor_x, anchor_y)`,
/// then clamps it into `bounds`.
///
/// A box larger than the bounds is pinned to the top-left corner.
#[must_use]
pub fn place_tooltip(
    anchor_x: f64,
    anchor_y: f64,
    width: f64,
    height: f64,
    layout: TooltipLayout,
    bounds: PlotRect,
) -> (f64, f64) {
    let x = anchor_x - width - layout.offset_x_px;
    let y = anchor_y - height - layout.offset_y_px;
    (
        clamp_span(x, width, bounds.left, bounds.right()),
        clamp_span(y, height, bounds.top, bounds.bottom()),
    )
}

fn clamp_span(start: f64, size: f64, low: f64, high: f64) -> f64 {
    let max_start = high - size;
    if max_start <= low || !start.is_finite() {
        return low;
    }
    start.clamp(low, max_start)
}
