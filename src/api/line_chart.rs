use tracing::debug;

use crate::core::{
    DomainBaseline, LineProjectionOptions, LineSeriesGeometry, ScaleMapping, Series, ValueDomain,
    Viewport, project_all_series,
};
use crate::error::ChartResult;
use crate::extensions::{ChartEvent, ChartPlugin};
use crate::interaction::{
    HitRegion, HitRegionTable, HitShape, HitTarget, ItemId, SelectionState, TooltipAnchor,
};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, LinePrimitive, LineStrokeStyle, PolygonPrimitive,
    RenderFrame, Renderer,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::axis_ticks::{
    CategoryTick, ValueTick, build_category_ticks, build_value_ticks, value_tick_values,
};
use super::cartesian::{paint_category_ticks, paint_value_axis, value_gutter};
use super::chart_config::{ChartFamily, LineChartConfig};
use super::chart_core::ChartCore;
use super::label_formatter::ValueFormatterFn;
use super::legend::{LegendEntry, LegendLayout, layout_legend};
use super::plot_layout::{AXIS_LABEL_GAP_PX, CHART_PADDING_PX, CartesianGutters, PlotLayout};

/// Everything one line-chart render pass derives from its inputs.
#[derive(Debug, Clone)]
pub struct LineScene {
    pub frame: RenderFrame,
    pub hit_regions: HitRegionTable,
    pub layout: PlotLayout,
    pub mapping: ScaleMapping,
    pub value_ticks: Vec<ValueTick>,
    pub category_ticks: Vec<CategoryTick>,
    pub geometries: Vec<LineSeriesGeometry>,
}

/// Value-axis domain across all series, bands included.
#[must_use]
pub fn line_domain(config: &LineChartConfig, series: &[Series]) -> ValueDomain {
    let baseline = if config.fill_area {
        DomainBaseline::ZeroFloor
    } else if config.zero_baseline {
        DomainBaseline::IncludeZero
    } else {
        DomainBaseline::Data
    };
    ValueDomain::from_values(series.iter().flat_map(Series::domain_values), baseline)
}

/// Category labels of the longest series; points are placed by index so the
/// longest series defines the category axis.
fn category_labels(series: &[Series]) -> Vec<String> {
    series
        .iter()
        .max_by_key(|entry| entry.points.len())
        .map(|entry| entry.points.iter().map(|point| point.display_label()).collect())
        .unwrap_or_default()
}

/// One full render pass: scale, shapes, ticks, legend and hit regions.
///
/// Pure in its inputs; the facade owns the resulting hit regions until the
/// next pass.
#[must_use]
pub fn build_line_scene(
    config: &LineChartConfig,
    series: &[Series],
    selection: &SelectionState,
    formatter: &ValueFormatterFn,
) -> LineScene {
    let theme = &config.theme;
    let flags = config.flags;
    let viewport = config.viewport;

    let domain = line_domain(config, series);
    let point_count = series
        .iter()
        .map(|entry| entry.points.len())
        .max()
        .unwrap_or(0);
    let labels = category_labels(series);

    let legend = if flags.show_legend && !series.is_empty() {
        let entries = series
            .iter()
            .map(|entry| {
                LegendEntry::new(ItemId::Series(entry.id.clone()), &entry.name, entry.color)
            })
            .collect();
        layout_legend(
            entries,
            f64::from(viewport.width) - 2.0 * CHART_PADDING_PX,
            theme.legend_font_size_px,
        )
    } else {
        LegendLayout::default()
    };

    let tick_values = value_tick_values(domain, config.value_tick_count);
    let layout = PlotLayout::cartesian(
        viewport,
        CartesianGutters {
            left_px: value_gutter(&tick_values, formatter, theme.axis_font_size_px),
            bottom_px: if labels.is_empty() {
                0.0
            } else {
                theme.axis_font_size_px + AXIS_LABEL_GAP_PX
            },
            legend_height_px: legend.height,
        },
    );
    let plot = layout.plot;
    let mapping = ScaleMapping::new(domain, point_count, plot);

    let value_ticks = build_value_ticks(
        domain,
        config.value_tick_count,
        mapping.value_scale(),
        formatter,
    );
    let category_ticks = build_category_ticks(&labels, config.max_category_labels, |index| {
        mapping.scale_index(index)
    });

    let geometries = project_all_series(
        series,
        &mapping,
        LineProjectionOptions {
            marker_radius_px: config.marker_radius_px,
            fill_area: config.fill_area,
        },
    );

    let mut frame = RenderFrame::new(viewport);
    let mut hit_regions = HitRegionTable::new(config.marker_tolerance_px);

    paint_value_axis(&mut frame, &value_ticks, plot, theme, flags.show_grid, false);
    paint_category_ticks(&mut frame, &category_ticks, plot, theme, false);

    for (entry, geometry) in series.iter().zip(&geometries) {
        let opacity = selection.opacity_for(&ItemId::Series(entry.id.clone()));
        let color = entry.color.faded(opacity);

        if let Some(band) = &geometry.band
            && band.vertices.len() >= 3
        {
            frame.push_polygon(
                CanvasLayerKind::Fill,
                PolygonPrimitive::new(
                    band.vertices.clone(),
                    entry.color.faded(theme.band_opacity * opacity),
                ),
            );
        }
        if let Some(area) = &geometry.area
            && area.len() >= 3
        {
            frame.push_polygon(
                CanvasLayerKind::Fill,
                PolygonPrimitive::new(
                    area.clone(),
                    entry.color.faded(theme.area_opacity * opacity),
                ),
            );
        }

        let stroke_style = if geometry.dashed {
            LineStrokeStyle::Dashed
        } else {
            LineStrokeStyle::Solid
        };
        for segment in &geometry.segments {
            frame.push_line(
                CanvasLayerKind::Series,
                LinePrimitive::new(
                    segment.x1,
                    segment.y1,
                    segment.x2,
                    segment.y2,
                    theme.line_width_px,
                    color,
                )
                .with_stroke_style(stroke_style),
            );
        }

        for marker in &geometry.markers {
            frame.push_circle(
                CanvasLayerKind::Marker,
                CirclePrimitive::new(marker.x, marker.y, marker.radius, color),
            );
            hit_regions.register(
                HitTarget::Point {
                    series_id: marker.series_id.clone(),
                    point_index: marker.point_index,
                },
                HitRegion::new(
                    HitShape::Marker {
                        cx: marker.x,
                        cy: marker.y,
                        radius: marker.radius,
                    },
                    (marker.x, marker.y - marker.radius),
                ),
            );
        }
    }

    if let Some(strip) = layout.legend {
        let legend = legend.positioned(strip);
        legend.register_hit_regions(&mut hit_regions);
        legend.paint(&mut frame, selection, theme.legend_text_color);
    }

    LineScene {
        frame,
        hit_regions,
        layout,
        mapping,
        value_ticks,
        category_ticks,
        geometries,
    }
}

fn point_event(series: &[Series], target: &HitTarget) -> Option<ChartEvent> {
    let HitTarget::Point {
        series_id,
        point_index,
    } = target
    else {
        return None;
    };
    let entry = series.iter().find(|entry| &entry.id == series_id)?;
    let point = entry.points.get(*point_index)?;
    Some(ChartEvent::PointSelected {
        series_id: series_id.clone(),
        point_index: *point_index,
        point: point.clone(),
    })
}

fn point_tooltip_lines(
    series: &[Series],
    target: &HitTarget,
    formatter: &ValueFormatterFn,
) -> Vec<String> {
    let HitTarget::Point {
        series_id,
        point_index,
    } = target
    else {
        return Vec::new();
    };
    let Some(entry) = series.iter().find(|entry| &entry.id == series_id) else {
        return Vec::new();
    };
    let Some(point) = entry.points.get(*point_index) else {
        return Vec::new();
    };
    vec![
        entry.name.clone(),
        format!("{}: {}", point.display_label(), formatter(point.y)),
    ]
}

/// Line/area chart facade.
///
/// Owns its selection and hit regions; series are replaced wholesale and
/// every render recomputes the full geometry pipeline.
pub struct LineChart<R: Renderer> {
    renderer: R,
    config: LineChartConfig,
    series: Vec<Series>,
    core: ChartCore,
}

impl<R: Renderer> LineChart<R> {
    pub fn new(renderer: R, config: LineChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let core = ChartCore::new(ChartFamily::Line, config.viewport)?;
        Ok(Self {
            renderer,
            config,
            series: Vec::new(),
            core,
        })
    }

    #[must_use]
    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LineChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.core.set_viewport(config.viewport)?;
        self.config = config;
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.core.set_viewport(viewport)?;
        self.config.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Replaces all series. The selection survives only when the series ids
    /// are unchanged.
    pub fn set_series(&mut self, series: Vec<Series>) {
        let identity_changed = self.series.len() != series.len()
            || self
                .series
                .iter()
                .zip(&series)
                .any(|(current, next)| current.id != next.id);
        debug!(
            series = series.len(),
            points = series.iter().map(|entry| entry.points.len()).sum::<usize>(),
            identity_changed,
            "line chart series replaced"
        );
        self.series = series;
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

    /// Computes the scene for the current inputs without touching chart
    /// state.
    #[must_use]
    pub fn scene(&self) -> LineScene {
        build_line_scene(
            &self.config,
            &self.series,
            self.core.selection(),
            &self.core.formatter,
        )
    }

    /// Runs a render pass: installs its hit regions, refreshes the tooltip
    /// and returns the frame with the tooltip overlay.
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
            "line chart frame built"
        );
        frame
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)
    }

    /// Renders into an external cairo context, e.g. from a GTK draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }

    /// Routes a pointer press through the hit regions of the displayed
    /// geometry and notifies plugins. Returns the emitted event, if any.
    pub fn press(&mut self, x: f64, y: f64) -> Option<ChartEvent> {
        if self.core.scene_dirty {
            let scene = self.scene();
            self.core.install_hit_regions(scene.hit_regions);
        }
        let outcome = self.core.route_press(x, y);
        let event = ChartCore::outcome_event(outcome, |target| point_event(&self.series, target));
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
        let series = &self.series;
        let formatter = self.core.formatter.clone();
        let lines_for = |target: &HitTarget| point_tooltip_lines(series, target, &formatter);
        self.core.refresh_tooltip(self.config.tooltip, lines_for);
    }
}
