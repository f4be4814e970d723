use serde::{Deserialize, Serialize};

use crate::core::{PlotRect, Viewport};

/// Outer padding between the viewport edge and any chart content.
pub const CHART_PADDING_PX: f64 = 8.0;
/// Gap between axis labels and the plot rectangle.
pub const AXIS_LABEL_GAP_PX: f64 = 6.0;
/// Average glyph advance relative to the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Width estimate used for layout before any text is shaped.
#[must_use]
pub fn estimate_text_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * GLYPH_WIDTH_RATIO
}

/// Gutter needed to fit the widest of `labels` next to an axis.
#[must_use]
pub fn label_gutter<'a>(labels: impl IntoIterator<Item = &'a str>, font_size_px: f64) -> f64 {
    let widest = labels
        .into_iter()
        .map(|label| estimate_text_width(label, font_size_px))
        .fold(0.0, f64::max);
    if widest > 0.0 {
        widest + AXIS_LABEL_GAP_PX
    } else {
        0.0
    }
}

/// Space reserved around a cartesian plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianGutters {
    pub left_px: f64,
    pub bottom_px: f64,
    pub legend_height_px: f64,
}

/// Viewport split into the plot rectangle and an optional legend strip along
/// the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub viewport: Viewport,
    pub plot: PlotRect,
    pub legend: Option<PlotRect>,
}

impl PlotLayout {
    #[must_use]
    pub fn cartesian(viewport: Viewport, gutters: CartesianGutters) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let legend_height = sanitize(gutters.legend_height_px);

        let left = CHART_PADDING_PX + sanitize(gutters.left_px);
        let top = CHART_PADDING_PX;
        let bottom_reserved = sanitize(gutters.bottom_px) + legend_height + CHART_PADDING_PX;
        let plot = PlotRect::new(
            left,
            top,
            width - left - CHART_PADDING_PX,
            height - top - bottom_reserved,
        );

        Self {
            viewport,
            plot,
            legend: legend_strip(width, height, legend_height),
        }
    }

    /// Layout for circular charts: the plot is everything above the legend.
    #[must_use]
    pub fn radial(viewport: Viewport, legend_height_px: f64) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let legend_height = sanitize(legend_height_px);
        let reserved = if legend_height > 0.0 {
            legend_height + CHART_PADDING_PX
        } else {
            0.0
        };

        Self {
            viewport,
            plot: PlotRect::new(0.0, 0.0, width, height - reserved),
            legend: legend_strip(width, height, legend_height),
        }
    }

    /// Full viewport rectangle, the bounds tooltips are clamped into.
    #[must_use]
    pub fn bounds(&self) -> PlotRect {
        PlotRect::sized(f64::from(self.viewport.width), f64::from(self.viewport.height))
    }
}

fn legend_strip(width: f64, height: f64, legend_height: f64) -> Option<PlotRect> {
    (legend_height > 0.0).then(|| {
        PlotRect::new(
            CHART_PADDING_PX,
            height - CHART_PADDING_PX - legend_height,
            width - 2.0 * CHART_PADDING_PX,
            legend_height,
        )
    })
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
