use tracing::debug;

use crate::core::{
    BarMode, BarOrientation, BarProjection, CategoricalBar, LinearScale, Viewport, bar_domain,
    project_bars,
};
use crate::error::ChartResult;
use crate::extensions::{ChartEvent, ChartPlugin};
use crate::interaction::{
    HitRegion, HitRegionTable, HitShape, HitTarget, ItemId, SelectionState, TooltipAnchor,
};
use crate::render::{
    CanvasLayerKind, Color, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    TextVAlign,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::axis_ticks::{
    CategoryTick, ValueTick, build_category_ticks, build_value_ticks, value_tick_values,
};
use super::cartesian::{paint_category_ticks, paint_value_axis, value_gutter};
use super::chart_config::{BarChartConfig, ChartFamily, ChartTheme};
use super::chart_core::ChartCore;
use super::label_formatter::ValueFormatterFn;
use super::legend::{LegendEntry, LegendLayout, layout_legend};
use super::plot_layout::{
    AXIS_LABEL_GAP_PX, CHART_PADDING_PX, CartesianGutters, PlotLayout, label_gutter,
};

const VALUE_LABEL_OFFSET_PX: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct BarScene {
    pub frame: RenderFrame,
    pub hit_regions: HitRegionTable,
    pub layout: PlotLayout,
    pub projection: BarProjection,
    pub value_ticks: Vec<ValueTick>,
    pub category_ticks: Vec<CategoryTick>,
}

/// Number of groups the legend lists in grouped/stacked mode.
fn group_count(bars: &[CategoricalBar]) -> usize {
    bars.iter().map(|bar| bar.groups().len()).max().unwrap_or(0)
}

fn group_label(config: &BarChartConfig, group_index: usize) -> String {
    config
        .group_labels
        .get(group_index)
        .filter(|label| !label.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("Group {}", group_index + 1))
}

fn bar_color(theme: &ChartTheme, bar: &CategoricalBar, category_index: usize) -> Color {
    bar.color
        .unwrap_or_else(|| theme.palette_color(category_index))
}

/// Highlight identity of a rendered bar: the bar itself in single mode, its
/// group otherwise.
fn bar_identity(mode: BarMode, category_index: usize, group_index: Option<usize>) -> ItemId {
    match (mode, group_index) {
        (BarMode::Single, _) | (_, None) => ItemId::Bar(category_index),
        (_, Some(group_index)) => ItemId::BarGroup(group_index),
    }
}

fn legend_entries(config: &BarChartConfig, bars: &[CategoricalBar]) -> Vec<LegendEntry> {
    match config.mode {
        BarMode::Single => bars
            .iter()
            .enumerate()
            .map(|(index, bar)| {
                LegendEntry::new(
                    ItemId::Bar(index),
                    &bar.label,
                    bar_color(&config.theme, bar, index),
                )
            })
            .collect(),
        BarMode::Grouped | BarMode::Stacked => (0..group_count(bars))
            .map(|group_index| {
                LegendEntry::new(
                    ItemId::BarGroup(group_index),
                    group_label(config, group_index),
                    config.theme.palette_color(group_index),
                )
            })
            .collect(),
    }
}

/// One full bar-chart render pass.
///
/// Both orientations share every step; only the axis painting and the
/// projection's final orient step look at `config.orientation`.
#[must_use]
pub fn build_bar_scene(
    config: &BarChartConfig,
    bars: &[CategoricalBar],
    selection: &SelectionState,
    formatter: &ValueFormatterFn,
) -> BarScene {
    let theme = &config.theme;
    let flags = config.flags;
    let viewport = config.viewport;
    let horizontal = config.orientation == BarOrientation::Horizontal;

    let domain = bar_domain(bars, config.mode);
    let labels: Vec<String> = bars.iter().map(|bar| bar.label.clone()).collect();

    let legend = if flags.show_legend && !bars.is_empty() {
        layout_legend(
            legend_entries(config, bars),
            f64::from(viewport.width) - 2.0 * CHART_PADDING_PX,
            theme.legend_font_size_px,
        )
    } else {
        LegendLayout::default()
    };

    let tick_values = value_tick_values(domain, config.value_tick_count);
    let label_row = theme.axis_font_size_px + AXIS_LABEL_GAP_PX;
    let gutters = if horizontal {
        CartesianGutters {
            left_px: label_gutter(labels.iter().map(String::as_str), theme.axis_font_size_px),
            bottom_px: label_row,
            legend_height_px: legend.height,
        }
    } else {
        CartesianGutters {
            left_px: value_gutter(&tick_values, formatter, theme.axis_font_size_px),
            bottom_px: if bars.is_empty() { 0.0 } else { label_row },
            legend_height_px: legend.height,
        }
    };
    let layout = PlotLayout::cartesian(viewport, gutters);
    let plot = layout.plot;

    let projection = project_bars(
        bars,
        config.mode,
        config.orientation,
        plot,
        domain,
        config.spacing,
    );

    let value_scale = if horizontal {
        LinearScale::widened(domain.min, domain.max, plot.left, plot.right())
    } else {
        LinearScale::widened(domain.min, domain.max, plot.bottom(), plot.top)
    };
    let value_ticks = build_value_ticks(domain, config.value_tick_count, value_scale, formatter);
    let category_ticks = build_category_ticks(&labels, config.max_category_labels, |index| {
        projection
            .category_centers
            .get(index)
            .copied()
            .unwrap_or(plot.left)
    });

    let mut frame = RenderFrame::new(viewport);
    let mut hit_regions = HitRegionTable::new(0.0);

    paint_value_axis(&mut frame, &value_ticks, plot, theme, flags.show_grid, horizontal);
    paint_category_ticks(&mut frame, &category_ticks, plot, theme, horizontal);

    for rect in &projection.rects {
        let Some(bar) = bars.get(rect.category_index) else {
            continue;
        };
        let base_color = match (config.mode, rect.group_index) {
            (BarMode::Single, _) | (_, None) => bar_color(theme, bar, rect.category_index),
            (_, Some(group_index)) => theme.palette_color(group_index),
        };
        let identity = bar_identity(config.mode, rect.category_index, rect.group_index);
        let corner_radius = theme
            .bar_corner_radius_px
            .min(rect.width * 0.5)
            .min(rect.height * 0.5)
            .max(0.0);

        frame.push_rect(
            CanvasLayerKind::Series,
            RectPrimitive::new(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                base_color.faded(selection.opacity_for(&identity)),
            )
            .with_corner_radius(corner_radius),
        );

        let anchor = if horizontal {
            (rect.x + rect.width, rect.y + rect.height * 0.5)
        } else {
            (rect.x + rect.width * 0.5, rect.y)
        };
        hit_regions.register(
            HitTarget::Bar {
                category_index: rect.category_index,
                group_index: rect.group_index,
            },
            HitRegion::new(
                HitShape::Rect {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                },
                anchor,
            ),
        );
    }

    if flags.show_values {
        for anchor in &projection.value_anchors {
            let text = formatter(anchor.value);
            if text.is_empty() {
                continue;
            }
            let opacity = match (config.mode, anchor.group_index) {
                (BarMode::Stacked, None) => 1.0,
                (mode, group_index) => {
                    selection.opacity_for(&bar_identity(mode, anchor.category_index, group_index))
                }
            };
            let color = theme.value_label_color.faded(opacity);
            let label = if horizontal {
                TextPrimitive::new(
                    text,
                    anchor.x + VALUE_LABEL_OFFSET_PX,
                    anchor.y,
                    theme.value_font_size_px,
                    color,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Middle)
            } else {
                TextPrimitive::new(
                    text,
                    anchor.x,
                    anchor.y - VALUE_LABEL_OFFSET_PX,
                    theme.value_font_size_px,
                    color,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Bottom)
            };
            frame.push_text(CanvasLayerKind::Label, label);
        }
    }

    if let Some(strip) = layout.legend {
        let legend = legend.positioned(strip);
        legend.register_hit_regions(&mut hit_regions);
        legend.paint(&mut frame, selection, theme.legend_text_color);
    }

    BarScene {
        frame,
        hit_regions,
        layout,
        projection,
        value_ticks,
        category_ticks,
    }
}

fn bar_event(bars: &[CategoricalBar], target: &HitTarget) -> Option<ChartEvent> {
    let HitTarget::Bar {
        category_index,
        group_index,
    } = target
    else {
        return None;
    };
    let bar = bars.get(*category_index)?;
    Some(ChartEvent::BarPressed {
        bar: bar.clone(),
        index: *category_index,
        group_index: *group_index,
    })
}

fn bar_tooltip_lines(
    config: &BarChartConfig,
    bars: &[CategoricalBar],
    target: &HitTarget,
    formatter: &ValueFormatterFn,
) -> Vec<String> {
    let HitTarget::Bar {
        category_index,
        group_index,
    } = target
    else {
        return Vec::new();
    };
    let Some(bar) = bars.get(*category_index) else {
        return Vec::new();
    };
    match group_index {
        Some(group_index) => {
            let value = bar.groups().get(*group_index).copied().unwrap_or(0.0);
            vec![
                bar.label.clone(),
                format!("{}: {}", group_label(config, *group_index), formatter(value)),
            ]
        }
        None => vec![bar.label.clone(), formatter(bar.value)],
    }
}

/// Single/grouped/stacked bar chart facade, vertical or horizontal.
pub struct BarChart<R: Renderer> {
    renderer: R,
    config: BarChartConfig,
    bars: Vec<CategoricalBar>,
    core: ChartCore,
}

impl<R: Renderer> BarChart<R> {
    pub fn new(renderer: R, config: BarChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let core = ChartCore::new(ChartFamily::Bar, config.viewport)?;
        Ok(Self {
            renderer,
            config,
            bars: Vec::new(),
            core,
        })
    }

    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    /// Replaces the configuration. Switching mode changes what a highlight
    /// refers to, so it also drops the selection.
    pub fn set_config(&mut self, config: BarChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.core.set_viewport(config.viewport)?;
        let mode_changed = config.mode != self.config.mode;
        self.config = config;
        self.core.data_replaced(mode_changed);
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.core.set_viewport(viewport)?;
        self.config.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn bars(&self) -> &[CategoricalBar] {
        &self.bars
    }

    /// Replaces all bars. The selection survives only when the category
    /// labels are unchanged.
    pub fn set_bars(&mut self, bars: Vec<CategoricalBar>) {
        let identity_changed = self.bars.len() != bars.len()
            || self
                .bars
                .iter()
                .zip(&bars)
                .any(|(current, next)| current.label != next.label);
        debug!(
            bars = bars.len(),
            mode = ?self.config.mode,
            identity_changed,
            "bar chart data replaced"
        );
        self.bars = bars;
        self.core.data_replaced(identity_changed);
    }

    pub fn set_value_formatter(&mut self, formatter: ValueFormatterFn) {
        self.core.set_formatter(formatter);
    }

    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        self.core.register_plugin(plugin)
    }

    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        self.core.unregister_plugin(plugin_id)
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.core.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.core.has_plugin(plugin_id)
    }

    #[must_use]
    pub fn scene(&self) -> BarScene {
        build_bar_scene(
            &self.config,
            &self.bars,
            self.core.selection(),
            &self.core.formatter,
        )
    }

    pub fn build_frame(&mut self) -> RenderFrame {
        let scene = self.scene();
        let mut frame = scene.frame;
        self.core.install_hit_regions(scene.hit_regions);
        self.refresh_tooltip();
        self.core
            .paint_tooltip(&mut frame, &self.config.theme, self.config.tooltip);
        debug!(
            primitives = frame.primitive_count(),
            hit_regions = self.core.hit_regions.len(),
            "bar chart frame built"
        );
        frame
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)
    }

    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }

    pub fn press(&mut self, x: f64, y: f64) -> Option<ChartEvent> {
        if self.core.scene_dirty {
            let scene = self.scene();
            self.core.install_hit_regions(scene.hit_regions);
        }
        let outcome = self.core.route_press(x, y);
        let event = ChartCore::outcome_event(outcome, |target| bar_event(&self.bars, target));
        self.refresh_tooltip();
        if let Some(event) = &event {
            self.core.emit(event);
        }
        event
    }

    pub fn clear_selection(&mut self) {
        self.core.clear_selection();
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.core.selection()
    }

    #[must_use]
    pub fn selected_target(&self) -> Option<&HitTarget> {
        self.core.interaction.selected_target()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipAnchor> {
        self.core.tooltip.as_ref()
    }

    #[must_use]
    pub fn hit_regions(&self) -> &HitRegionTable {
        &self.core.hit_regions
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn refresh_tooltip(&mut self) {
        let config = &self.config;
        let bars = &self.bars;
        let formatter = self.core.formatter.clone();
        let lines_for =
            |target: &HitTarget| bar_tooltip_lines(config, bars, target, &formatter);
        self.core.refresh_tooltip(self.config.tooltip, lines_for);
    }
}
