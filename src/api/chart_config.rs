use serde::{Deserialize, Serialize};

use crate::core::line_series::DEFAULT_MARKER_RADIUS_PX;
use crate::core::pie_series::DEFAULT_DONUT_INNER_RATIO;
use crate::core::types::DEFAULT_SERIES_COLOR;
use crate::core::{BarMode, BarOrientation, BarSpacing, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipLayout;
use crate::interaction::hit_test::DEFAULT_MARKER_TOLERANCE_PX;
use crate::render::Color;

pub const DEFAULT_VALUE_TICK_COUNT: usize = 5;
pub const DEFAULT_MAX_CATEGORY_LABELS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartFamily {
    Line,
    Bar,
    Pie,
}

/// Optional chart furniture toggled by the calling screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFlags {
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default)]
    pub show_values: bool,
    #[serde(default = "default_true")]
    pub show_percentages: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_legend: true,
            show_grid: true,
            show_values: false,
            show_percentages: true,
        }
    }
}

impl DisplayFlags {
    #[must_use]
    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    #[must_use]
    pub fn with_values(mut self, show: bool) -> Self {
        self.show_values = show;
        self
    }

    #[must_use]
    pub fn with_percentages(mut self, show: bool) -> Self {
        self.show_percentages = show;
        self
    }
}

/// Colors and text sizes shared by all chart families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    /// Cycled for bars, bar groups and segments without their own color.
    pub palette: Vec<Color>,
    pub axis_label_color: Color,
    pub grid_color: Color,
    pub value_label_color: Color,
    pub legend_text_color: Color,
    pub tooltip_background: Color,
    pub tooltip_text_color: Color,
    pub donut_hole_color: Color,
    /// Percentage labels drawn on top of pie wedges.
    pub segment_label_color: Color,
    pub axis_font_size_px: f64,
    pub legend_font_size_px: f64,
    pub value_font_size_px: f64,
    pub center_label_font_size_px: f64,
    pub center_value_font_size_px: f64,
    pub line_width_px: f64,
    pub band_opacity: f64,
    pub area_opacity: f64,
    pub bar_corner_radius_px: f64,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::rgb(0.310, 0.275, 0.898),
                Color::rgb(0.063, 0.725, 0.506),
                Color::rgb(0.961, 0.620, 0.043),
                Color::rgb(0.937, 0.267, 0.267),
                Color::rgb(0.545, 0.361, 0.965),
                Color::rgb(0.024, 0.714, 0.831),
                Color::rgb(0.925, 0.282, 0.600),
                Color::rgb(0.518, 0.800, 0.086),
            ],
            axis_label_color: Color::rgb(0.420, 0.447, 0.502),
            grid_color: Color::rgb(0.898, 0.906, 0.922),
            value_label_color: Color::rgb(0.216, 0.255, 0.318),
            legend_text_color: Color::rgb(0.216, 0.255, 0.318),
            tooltip_background: Color::rgba(0.067, 0.094, 0.153, 0.92),
            tooltip_text_color: Color::rgb(1.0, 1.0, 1.0),
            donut_hole_color: Color::rgb(1.0, 1.0, 1.0),
            segment_label_color: Color::rgb(1.0, 1.0, 1.0),
            axis_font_size_px: 10.0,
            legend_font_size_px: 11.0,
            value_font_size_px: 10.0,
            center_label_font_size_px: 12.0,
            center_value_font_size_px: 20.0,
            line_width_px: 2.0,
            band_opacity: 0.2,
            area_opacity: 0.25,
            bar_corner_radius_px: 2.0,
        }
    }
}

impl ChartTheme {
    /// Palette color for `index`, wrapping around.
    #[must_use]
    pub fn palette_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return DEFAULT_SERIES_COLOR;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in self.palette.iter().copied().chain([
            self.axis_label_color,
            self.grid_color,
            self.value_label_color,
            self.legend_text_color,
            self.tooltip_background,
            self.tooltip_text_color,
            self.donut_hole_color,
            self.segment_label_color,
        ]) {
            color.validate()?;
        }
        for (name, size) in [
            ("axis font size", self.axis_font_size_px),
            ("legend font size", self.legend_font_size_px),
            ("value font size", self.value_font_size_px),
            ("center label font size", self.center_label_font_size_px),
            ("center value font size", self.center_value_font_size_px),
            ("line width", self.line_width_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, opacity) in [
            ("band opacity", self.band_opacity),
            ("area opacity", self.area_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub flags: DisplayFlags,
    /// Render each series as a filled area down to zero.
    #[serde(default)]
    pub fill_area: bool,
    /// Keep zero inside the value domain; `false` fits the data tightly.
    #[serde(default = "default_true")]
    pub zero_baseline: bool,
    #[serde(default = "default_value_tick_count")]
    pub value_tick_count: usize,
    #[serde(default = "default_max_category_labels")]
    pub max_category_labels: usize,
    #[serde(default = "default_marker_radius_px")]
    pub marker_radius_px: f64,
    #[serde(default = "default_marker_tolerance_px")]
    pub marker_tolerance_px: f64,
    #[serde(default)]
    pub theme: ChartTheme,
    #[serde(default)]
    pub tooltip: TooltipLayout,
}

impl LineChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            flags: DisplayFlags::default(),
            fill_area: false,
            zero_baseline: true,
            value_tick_count: DEFAULT_VALUE_TICK_COUNT,
            max_category_labels: DEFAULT_MAX_CATEGORY_LABELS,
            marker_radius_px: DEFAULT_MARKER_RADIUS_PX,
            marker_tolerance_px: DEFAULT_MARKER_TOLERANCE_PX,
            theme: ChartTheme::default(),
            tooltip: TooltipLayout::default(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: DisplayFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_fill_area(mut self, fill_area: bool) -> Self {
        self.fill_area = fill_area;
        self
    }

    #[must_use]
    pub fn with_zero_baseline(mut self, zero_baseline: bool) -> Self {
        self.zero_baseline = zero_baseline;
        self
    }

    #[must_use]
    pub fn with_value_tick_count(mut self, count: usize) -> Self {
        self.value_tick_count = count;
        self
    }

    #[must_use]
    pub fn with_max_category_labels(mut self, max_labels: usize) -> Self {
        self.max_category_labels = max_labels;
        self
    }

    #[must_use]
    pub fn with_marker_radius(mut self, radius_px: f64) -> Self {
        self.marker_radius_px = radius_px;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        validate_tick_budget(self.value_tick_count, self.max_category_labels)?;
        if !self.marker_radius_px.is_finite() || self.marker_radius_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.marker_tolerance_px.is_finite() || self.marker_tolerance_px < 0.0 {
            return Err(ChartError::InvalidData(
                "marker tolerance must be finite and >= 0".to_owned(),
            ));
        }
        self.tooltip.validate()?;
        self.theme.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub flags: DisplayFlags,
    #[serde(default = "default_bar_mode")]
    pub mode: BarMode,
    #[serde(default = "default_bar_orientation")]
    pub orientation: BarOrientation,
    #[serde(default)]
    pub spacing: BarSpacing,
    #[serde(default = "default_value_tick_count")]
    pub value_tick_count: usize,
    #[serde(default = "default_max_category_labels")]
    pub max_category_labels: usize,
    /// Legend names of the groups in grouped/stacked mode, by group index.
    #[serde(default)]
    pub group_labels: Vec<String>,
    #[serde(default)]
    pub theme: ChartTheme,
    #[serde(default)]
    pub tooltip: TooltipLayout,
}

impl BarChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            flags: DisplayFlags::default(),
            mode: default_bar_mode(),
            orientation: default_bar_orientation(),
            spacing: BarSpacing::default(),
            value_tick_count: DEFAULT_VALUE_TICK_COUNT,
            max_category_labels: DEFAULT_MAX_CATEGORY_LABELS,
            group_labels: Vec::new(),
            theme: ChartTheme::default(),
            tooltip: TooltipLayout::default(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: DisplayFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: BarMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: BarOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: BarSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_group_labels(mut self, labels: Vec<String>) -> Self {
        self.group_labels = labels;
        self
    }

    #[must_use]
    pub fn with_max_category_labels(mut self, max_labels: usize) -> Self {
        self.max_category_labels = max_labels;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        validate_tick_budget(self.value_tick_count, self.max_category_labels)?;
        for (name, spacing) in [
            ("bar spacing", self.spacing.bar_spacing_px),
            ("group spacing", self.spacing.group_spacing_px),
        ] {
            if !spacing.is_finite() || spacing < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        self.tooltip.validate()?;
        self.theme.validate()
    }
}

/// Text drawn over the donut hole, e.g. "Total" above "$12,400".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterLabel {
    pub label: String,
    /// Passed through the chart's value formatter.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub flags: DisplayFlags,
    /// Inner radius as a fraction of the outer one; `None` draws a full pie.
    #[serde(default)]
    pub donut_inner_ratio: Option<f64>,
    #[serde(default)]
    pub center: Option<CenterLabel>,
    #[serde(default = "default_pie_padding_px")]
    pub padding_px: f64,
    #[serde(default)]
    pub theme: ChartTheme,
    #[serde(default)]
    pub tooltip: TooltipLayout,
}

impl PieChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            flags: DisplayFlags::default(),
            donut_inner_ratio: None,
            center: None,
            padding_px: default_pie_padding_px(),
            theme: ChartTheme::default(),
            tooltip: TooltipLayout::default(),
        }
    }

    /// Donut with the default ring thickness.
    #[must_use]
    pub fn donut(viewport: Viewport) -> Self {
        Self::new(viewport).with_donut_inner_ratio(Some(DEFAULT_DONUT_INNER_RATIO))
    }

    #[must_use]
    pub fn with_flags(mut self, flags: DisplayFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_donut_inner_ratio(mut self, ratio: Option<f64>) -> Self {
        self.donut_inner_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_center(mut self, label: impl Into<String>, value: f64) -> Self {
        self.center = Some(CenterLabel {
            label: label.into(),
            value,
        });
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport)?;
        if let Some(ratio) = self.donut_inner_ratio
            && (!ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0)
        {
            return Err(ChartError::InvalidData(
                "donut inner ratio must be in (0, 1)".to_owned(),
            ));
        }
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(ChartError::InvalidData(
                "pie padding must be finite and >= 0".to_owned(),
            ));
        }
        self.tooltip.validate()?;
        self.theme.validate()
    }
}

pub(crate) fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

fn validate_tick_budget(value_tick_count: usize, max_category_labels: usize) -> ChartResult<()> {
    if value_tick_count < 2 {
        return Err(ChartError::InvalidData(
            "value tick count must be >= 2".to_owned(),
        ));
    }
    if max_category_labels == 0 {
        return Err(ChartError::InvalidData(
            "category label budget must be >= 1".to_owned(),
        ));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_value_tick_count() -> usize {
    DEFAULT_VALUE_TICK_COUNT
}

fn default_max_category_labels() -> usize {
    DEFAULT_MAX_CATEGORY_LABELS
}

fn default_marker_radius_px() -> f64 {
    DEFAULT_MARKER_RADIUS_PX
}

fn default_marker_tolerance_px() -> f64 {
    DEFAULT_MARKER_TOLERANCE_PX
}

fn default_bar_mode() -> BarMode {
    BarMode::Single
}

fn default_bar_orientation() -> BarOrientation {
    BarOrientation::Vertical
}

fn default_pie_padding_px() -> f64 {
    12.0
}
