use tracing::debug;

use crate::core::{PieGeometry, SegmentDatum, Viewport, polar_to_cartesian, project_pie};
use crate::error::ChartResult;
use crate::extensions::{ChartEvent, ChartPlugin};
use crate::interaction::{
    HitRegion, HitRegionTable, HitShape, HitTarget, ItemId, SelectionState, TooltipAnchor,
};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, RenderFrame, Renderer, SectorPrimitive, TextHAlign,
    TextPrimitive, TextVAlign,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::chart_config::{ChartFamily, PieChartConfig};
use super::chart_core::ChartCore;
use super::label_formatter::{ValueFormatterFn, format_percentage};
use super::legend::{LegendEntry, LegendLayout, layout_legend};
use super::plot_layout::{CHART_PADDING_PX, PlotLayout};

const CENTER_TEXT_GAP_PX: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct PieScene {
    pub frame: RenderFrame,
    pub hit_regions: HitRegionTable,
    pub layout: PlotLayout,
    pub geometry: PieGeometry,
}

/// One full pie/donut render pass.
#[must_use]
pub fn build_pie_scene(
    config: &PieChartConfig,
    segments: &[SegmentDatum],
    selection: &SelectionState,
    formatter: &ValueFormatterFn,
) -> PieScene {
    let theme = &config.theme;
    let flags = config.flags;
    let viewport = config.viewport;
    let segment_color = |index: usize| {
        segments
            .get(index)
            .and_then(|segment| segment.color)
            .unwrap_or_else(|| theme.palette_color(index))
    };

    let legend = if flags.show_legend && !segments.is_empty() {
        let entries = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                LegendEntry::new(
                    ItemId::Segment(segment.id.clone()),
                    &segment.label,
                    segment_color(index),
                )
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

    let layout = PlotLayout::radial(viewport, legend.height);
    let plot = layout.plot;
    let cx = plot.left + plot.width * 0.5;
    let cy = plot.top + plot.height * 0.5;
    let outer_radius = (plot.width.min(plot.height) * 0.5 - config.padding_px).max(0.0);
    let geometry = project_pie(segments, cx, cy, outer_radius, config.donut_inner_ratio);

    let mut frame = RenderFrame::new(viewport);
    let mut hit_regions = HitRegionTable::new(0.0);

    if geometry.outer_radius > 0.0 {
        for segment in &geometry.segments {
            if segment.sweep_deg <= 0.0 {
                continue;
            }
            let identity = ItemId::Segment(segment.segment_id.clone());
            frame.push_sector(
                CanvasLayerKind::Series,
                SectorPrimitive {
                    cx,
                    cy,
                    inner_radius: geometry.inner_radius,
                    outer_radius: geometry.outer_radius,
                    start_angle_deg: segment.start_angle_deg,
                    end_angle_deg: segment.end_angle_deg,
                    fill_color: segment_color(segment.index)
                        .faded(selection.opacity_for(&identity)),
                },
            );
            hit_regions.register(
                HitTarget::Segment {
                    segment_id: segment.segment_id.clone(),
                    index: segment.index,
                },
                HitRegion::new(
                    HitShape::Sector {
                        cx,
                        cy,
                        inner_radius: geometry.inner_radius,
                        outer_radius: geometry.outer_radius,
                        start_angle_deg: segment.start_angle_deg,
                        end_angle_deg: segment.end_angle_deg,
                    },
                    polar_to_cartesian(cx, cy, geometry.outer_radius, segment.mid_angle_deg()),
                ),
            );

            if flags.show_percentages && segment.label_visible {
                frame.push_text(
                    CanvasLayerKind::Label,
                    TextPrimitive::new(
                        format_percentage(segment.percentage),
                        segment.label_x,
                        segment.label_y,
                        theme.value_font_size_px,
                        theme
                            .segment_label_color
                            .faded(selection.opacity_for(&identity)),
                        TextHAlign::Center,
                    )
                    .with_v_align(TextVAlign::Middle),
                );
            }
        }

        if geometry.is_donut() && !geometry.segments.is_empty() {
            frame.push_circle(
                CanvasLayerKind::Marker,
                CirclePrimitive::new(cx, cy, geometry.inner_radius, theme.donut_hole_color),
            );
        }
    }

    if geometry.is_donut()
        && let Some(center) = &config.center
    {
        if !center.label.is_empty() {
            frame.push_text(
                CanvasLayerKind::Label,
                TextPrimitive::new(
                    center.label.clone(),
                    cx,
                    cy - CENTER_TEXT_GAP_PX,
                    theme.center_label_font_size_px,
                    theme.axis_label_color,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Bottom),
            );
        }
        let value = formatter(center.value);
        if !value.is_empty() {
            frame.push_text(
                CanvasLayerKind::Label,
                TextPrimitive::new(
                    value,
                    cx,
                    cy + CENTER_TEXT_GAP_PX,
                    theme.center_value_font_size_px,
                    theme.value_label_color,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Top),
            );
        }
    }

    if let Some(strip) = layout.legend {
        let legend = legend.positioned(strip);
        legend.register_hit_regions(&mut hit_regions);
        legend.paint(&mut frame, selection, theme.legend_text_color);
    }

    PieScene {
        frame,
        hit_regions,
        layout,
        geometry,
    }
}

fn segment_event(segments: &[SegmentDatum], target: &HitTarget) -> Option<ChartEvent> {
    let HitTarget::Segment { index, .. } = target else {
        return None;
    };
    let segment = segments.get(*index)?;
    Some(ChartEvent::SegmentPressed {
        segment: segment.clone(),
        index: *index,
    })
}

fn segment_tooltip_lines(
    segments: &[SegmentDatum],
    target: &HitTarget,
    formatter: &ValueFormatterFn,
) -> Vec<String> {
    let HitTarget::Segment { index, .. } = target else {
        return Vec::new();
    };
    let Some(segment) = segments.get(*index) else {
        return Vec::new();
    };
    let total: f64 = segments.iter().map(SegmentDatum::effective_value).sum();
    let value = segment.effective_value();
    let mut lines = vec![segment.label.clone(), formatter(value)];
    if total > 0.0 {
        lines[1] = format!("{} ({})", lines[1], format_percentage(value / total * 100.0));
    }
    lines
}

/// Pie/donut chart facade.
pub struct PieChart<R: Renderer> {
    renderer: R,
    config: PieChartConfig,
    segments: Vec<SegmentDatum>,
    core: ChartCore,
}

impl<R: Renderer> PieChart<R> {
    pub fn new(renderer: R, config: PieChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let core = ChartCore::new(ChartFamily::Pie, config.viewport)?;
        Ok(Self {
            renderer,
            config,
            segments: Vec::new(),
            core,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PieChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PieChartConfig) -> ChartResult<()> {
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
    pub fn segments(&self) -> &[SegmentDatum] {
        &self.segments
    }

    /// Replaces all segments. The selection survives only when the segment
    /// ids are unchanged.
    pub fn set_segments(&mut self, segments: Vec<SegmentDatum>) {
        let identity_changed = self.segments.len() != segments.len()
            || self
                .segments
                .iter()
                .zip(&segments)
                .any(|(current, next)| current.id != next.id);
        debug!(
            segments = segments.len(),
            identity_changed,
            "pie chart segments replaced"
        );
        self.segments = segments;
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
    pub fn scene(&self) -> PieScene {
        build_pie_scene(
            &self.config,
            &self.segments,
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
            total = scene.geometry.total,
            "pie chart frame built"
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
        let event =
            ChartCore::outcome_event(outcome, |target| segment_event(&self.segments, target));
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
        let segments = &self.segments;
        let formatter = self.core.formatter.clone();
        let lines_for = |target: &HitTarget| segment_tooltip_lines(segments, target, &formatter);
        self.core.refresh_tooltip(self.config.tooltip, lines_for);
    }
}
