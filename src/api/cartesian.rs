//! Axis furniture shared by the line and bar charts.
//!
//! `horizontal` means the value axis runs along the bottom edge (horizontal
//! bars); otherwise values run up the left edge.

use crate::core::PlotRect;
use crate::render::{
    CanvasLayerKind, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive, TextVAlign,
};

use super::axis_ticks::{CategoryTick, ValueTick};
use super::chart_config::ChartTheme;
use super::label_formatter::ValueFormatterFn;
use super::plot_layout::{AXIS_LABEL_GAP_PX, label_gutter};

const GRID_LINE_WIDTH_PX: f64 = 1.0;

/// Left gutter wide enough for the formatted tick values.
pub(super) fn value_gutter(
    values: &[f64],
    formatter: &ValueFormatterFn,
    font_size_px: f64,
) -> f64 {
    let labels: Vec<String> = values.iter().map(|value| formatter(*value)).collect();
    label_gutter(labels.iter().map(String::as_str), font_size_px)
}

pub(super) fn paint_value_axis(
    frame: &mut RenderFrame,
    ticks: &[ValueTick],
    plot: PlotRect,
    theme: &ChartTheme,
    show_grid: bool,
    horizontal: bool,
) {
    for tick in ticks {
        if show_grid {
            let line = if horizontal {
                LinePrimitive::new(
                    tick.pixel,
                    plot.top,
                    tick.pixel,
                    plot.bottom(),
                    GRID_LINE_WIDTH_PX,
                    theme.grid_color,
                )
            } else {
                LinePrimitive::new(
                    plot.left,
                    tick.pixel,
                    plot.right(),
                    tick.pixel,
                    GRID_LINE_WIDTH_PX,
                    theme.grid_color,
                )
            };
            frame.push_line(CanvasLayerKind::Grid, line);
        }

        if tick.label.is_empty() {
            continue;
        }
        let text = if horizontal {
            TextPrimitive::new(
                tick.label.clone(),
                tick.pixel,
                plot.bottom() + AXIS_LABEL_GAP_PX,
                theme.axis_font_size_px,
                theme.axis_label_color,
                TextHAlign::Center,
            )
        } else {
            TextPrimitive::new(
                tick.label.clone(),
                plot.left - AXIS_LABEL_GAP_PX,
                tick.pixel,
                theme.axis_font_size_px,
                theme.axis_label_color,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Middle)
        };
        frame.push_text(CanvasLayerKind::Label, text);
    }
}

pub(super) fn paint_category_ticks(
    frame: &mut RenderFrame,
    ticks: &[CategoryTick],
    plot: PlotRect,
    theme: &ChartTheme,
    horizontal: bool,
) {
    for tick in ticks.iter().filter(|tick| !tick.label.is_empty()) {
        let text = if horizontal {
            TextPrimitive::new(
                tick.label.clone(),
                plot.left - AXIS_LABEL_GAP_PX,
                tick.pixel,
                theme.axis_font_size_px,
                theme.axis_label_color,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Middle)
        } else {
            TextPrimitive::new(
                tick.label.clone(),
                tick.pixel,
                plot.bottom() + AXIS_LABEL_GAP_PX,
                theme.axis_font_size_px,
                theme.axis_label_color,
                TextHAlign::Center,
            )
        };
        frame.push_text(CanvasLayerKind::Label, text);
    }
}
