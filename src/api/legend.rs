//! Legend rows: one swatch + label per highlightable item.
//!
//! Entries wrap into as many rows as the strip width requires. Each entry is
//! registered as a hit region so pressing it toggles the selection, and the
//! entries themselves dim under an active selection like any other primitive.

use serde::{Deserialize, Serialize};

use crate::core::PlotRect;
use crate::interaction::{HitRegion, HitRegionTable, HitShape, HitTarget, ItemId, SelectionState};
use crate::render::{
    CanvasLayerKind, Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, TextVAlign,
};

use super::plot_layout::estimate_text_width;

pub const LEGEND_SWATCH_PX: f64 = 10.0;
const SWATCH_LABEL_GAP_PX: f64 = 4.0;
const ITEM_GAP_PX: f64 = 12.0;
const ROW_GAP_PX: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub id: ItemId,
    pub label: String,
    pub color: Color,
}

impl LegendEntry {
    #[must_use]
    pub fn new(id: ItemId, label: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            label: label.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItemLayout {
    pub entry: LegendEntry,
    pub row: usize,
    /// Swatch plus label, in viewport pixels once positioned.
    pub bounds: PlotRect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub items: Vec<LegendItemLayout>,
    pub rows: usize,
    pub height: f64,
    pub font_size_px: f64,
}

/// Flows `entries` left to right into rows no wider than `max_width`,
/// relative to the origin. A single entry wider than the strip gets a row of
/// its own.
#[must_use]
pub fn layout_legend(
    entries: Vec<LegendEntry>,
    max_width: f64,
    font_size_px: f64,
) -> LegendLayout {
    let row_height = font_size_px.max(LEGEND_SWATCH_PX) + ROW_GAP_PX;
    let mut items = Vec::with_capacity(entries.len());
    let mut cursor_x = 0.0;
    let mut row = 0;

    for entry in entries {
        let item_width = LEGEND_SWATCH_PX
            + SWATCH_LABEL_GAP_PX
            + estimate_text_width(&entry.label, font_size_px);
        if cursor_x > 0.0 && cursor_x + item_width > max_width {
            row += 1;
            cursor_x = 0.0;
        }
        items.push(LegendItemLayout {
            entry,
            row,
            bounds: PlotRect::new(
                cursor_x,
                row as f64 * row_height,
                item_width,
                row_height - ROW_GAP_PX,
            ),
        });
        cursor_x += item_width + ITEM_GAP_PX;
    }

    let rows = if items.is_empty() { 0 } else { row + 1 };
    LegendLayout {
        items,
        rows,
        height: rows as f64 * row_height,
        font_size_px,
    }
}

impl LegendLayout {
    /// Moves the rows into `strip`, centering each row horizontally.
    #[must_use]
    pub fn positioned(mut self, strip: PlotRect) -> Self {
        for row in 0..self.rows {
            let row_right = self
                .items
                .iter()
                .filter(|item| item.row == row)
                .map(|item| item.bounds.right())
                .fold(0.0, f64::max);
            let shift = strip.left + ((strip.width - row_right) * 0.5).max(0.0);
            for item in self.items.iter_mut().filter(|item| item.row == row) {
                item.bounds.left += shift;
                item.bounds.top += strip.top;
            }
        }
        self
    }

    pub fn register_hit_regions(&self, table: &mut HitRegionTable) {
        for item in &self.items {
            let bounds = item.bounds;
            table.register(
                HitTarget::Legend(item.entry.id.clone()),
                HitRegion::new(
                    HitShape::Rect {
                        x: bounds.left,
                        y: bounds.top,
                        width: bounds.width,
                        height: bounds.height,
                    },
                    (bounds.left + LEGEND_SWATCH_PX * 0.5, bounds.top),
                ),
            );
        }
    }

    pub fn paint(&self, frame: &mut RenderFrame, selection: &SelectionState, text_color: Color) {
        for item in &self.items {
            let opacity = selection.opacity_for(&item.entry.id);
            let bounds = item.bounds;
            let center_y = bounds.top + bounds.height * 0.5;
            frame.push_rect(
                CanvasLayerKind::Legend,
                RectPrimitive::new(
                    bounds.left,
                    center_y - LEGEND_SWATCH_PX * 0.5,
                    LEGEND_SWATCH_PX,
                    LEGEND_SWATCH_PX,
                    item.entry.color.faded(opacity),
                )
                .with_corner_radius(2.0),
            );
            if item.entry.label.is_empty() {
                continue;
            }
            frame.push_text(
                CanvasLayerKind::Legend,
                TextPrimitive::new(
                    item.entry.label.clone(),
                    bounds.left + LEGEND_SWATCH_PX + SWATCH_LABEL_GAP_PX,
                    center_y,
                    self.font_size_px,
                    text_color.faded(opacity),
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle),
            );
        }
    }
}
