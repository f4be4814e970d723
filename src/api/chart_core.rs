use tracing::{debug, trace};

use crate::core::{PlotRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartEvent, ChartPlugin, PluginContext};
use crate::interaction::{
    HitRegionTable, HitTarget, InteractionState, PressOutcome, SelectionState, TooltipAnchor,
    TooltipLayout, place_tooltip,
};
use crate::render::{CanvasLayerKind, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::chart_config::{ChartFamily, ChartTheme, validate_viewport};
use super::label_formatter::{ValueFormatterFn, default_value_formatter};
use super::plot_layout::estimate_text_width;

const TOOLTIP_CORNER_RADIUS_PX: f64 = 4.0;

/// Per-instance state shared by the three chart facades: selection, the hit
/// regions of the last render pass, the tooltip, plugins and the formatter.
pub(super) struct ChartCore {
    pub(super) family: ChartFamily,
    pub(super) viewport: Viewport,
    pub(super) interaction: InteractionState,
    pub(super) hit_regions: HitRegionTable,
    pub(super) tooltip: Option<TooltipAnchor>,
    pub(super) formatter: ValueFormatterFn,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    /// Inputs changed since the hit regions were last rebuilt.
    pub(super) scene_dirty: bool,
}

impl ChartCore {
    pub(super) fn new(family: ChartFamily, viewport: Viewport) -> ChartResult<Self> {
        validate_viewport(viewport)?;
        Ok(Self {
            family,
            viewport,
            interaction: InteractionState::default(),
            hit_regions: HitRegionTable::default(),
            tooltip: None,
            formatter: default_value_formatter(),
            plugins: Vec::new(),
            scene_dirty: true,
        })
    }

    pub(super) fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        validate_viewport(viewport)?;
        self.viewport = viewport;
        self.scene_dirty = true;
        Ok(())
    }

    pub(super) fn set_formatter(&mut self, formatter: ValueFormatterFn) {
        self.formatter = formatter;
        self.scene_dirty = true;
    }

    /// Drops selection and tooltip when the data identity changed.
    pub(super) fn data_replaced(&mut self, identity_changed: bool) {
        if identity_changed {
            debug!(family = ?self.family, "data identity changed; resetting selection");
            self.clear_selection();
        }
        self.scene_dirty = true;
    }

    pub(super) fn clear_selection(&mut self) {
        self.interaction.reset();
        self.tooltip = None;
    }

    /// Full viewport rectangle; tooltips never leave it.
    #[must_use]
    pub(super) fn bounds(&self) -> PlotRect {
        PlotRect::sized(
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )
    }

    #[must_use]
    pub(super) fn selection(&self) -> &SelectionState {
        self.interaction.selection()
    }

    /// Installs the hit regions of a fresh render pass.
    pub(super) fn install_hit_regions(&mut self, hit_regions: HitRegionTable) {
        self.hit_regions = hit_regions;
        self.scene_dirty = false;
    }

    pub(super) fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.plugins.iter().any(|entry| entry.id() == plugin_id) {
            return Err(ChartError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    pub(super) fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        if let Some(position) = self
            .plugins
            .iter()
            .position(|entry| entry.id() == plugin_id)
        {
            self.plugins.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub(super) fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.id() == plugin_id)
    }

    fn plugin_context(&self) -> PluginContext {
        PluginContext {
            family: self.family,
            viewport: self.viewport,
            highlighted: self.interaction.selection().highlighted().cloned(),
            hit_regions: self.hit_regions.len(),
        }
    }

    pub(super) fn emit(&mut self, event: &ChartEvent) {
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            trace!(plugin = plugin.id(), ?event, "dispatch chart event");
            plugin.on_event(event, &context);
        }
    }

    /// Resolves a press against the current hit regions and updates the
    /// selection.
    pub(super) fn route_press(&mut self, x: f64, y: f64) -> PressOutcome {
        let target = self
            .hit_regions
            .resolve(x, y)
            .map(|resolution| resolution.target.clone());
        let outcome = self.interaction.on_press(x, y, target);
        debug!(family = ?self.family, x, y, ?outcome, "press routed");
        outcome
    }

    /// Maps a press outcome to the event hosts observe; `selected` builds the
    /// family-specific event for a data primitive.
    pub(super) fn outcome_event<F>(outcome: PressOutcome, selected: F) -> Option<ChartEvent>
    where
        F: FnOnce(&HitTarget) -> Option<ChartEvent>,
    {
        match outcome {
            PressOutcome::Selected(target) => selected(&target),
            PressOutcome::LegendToggled { id, active } => {
                Some(ChartEvent::LegendToggled { id, active })
            }
            PressOutcome::Cleared => Some(ChartEvent::SelectionCleared),
            PressOutcome::Ignored => None,
        }
    }

    /// Re-derives the tooltip from the selected target's current hit region.
    pub(super) fn refresh_tooltip<F>(&mut self, layout: TooltipLayout, lines_for: F)
    where
        F: FnOnce(&HitTarget) -> Vec<String>,
    {
        let Some(target) = self.interaction.selected_target() else {
            self.tooltip = None;
            return;
        };
        let Some(region) = self.hit_regions.get(target) else {
            self.tooltip = None;
            return;
        };

        let lines: Vec<String> = lines_for(target)
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            self.tooltip = None;
            return;
        }

        let width = lines
            .iter()
            .map(|line| estimate_text_width(line, layout.font_size_px))
            .fold(0.0, f64::max)
            + 2.0 * layout.padding_px;
        let height = lines.len() as f64 * layout.line_height_px + 2.0 * layout.padding_px;
        let (anchor_x, anchor_y) = region.anchor;
        let (x, y) = place_tooltip(anchor_x, anchor_y, width, height, layout, self.bounds());

        self.tooltip = Some(TooltipAnchor {
            x,
            y,
            width,
            height,
            target: target.clone(),
            lines,
        });
    }

    pub(super) fn paint_tooltip(
        &self,
        frame: &mut RenderFrame,
        theme: &ChartTheme,
        layout: TooltipLayout,
    ) {
        let Some(tooltip) = &self.tooltip else {
            return;
        };
        frame.push_rect(
            CanvasLayerKind::Overlay,
            RectPrimitive::new(
                tooltip.x,
                tooltip.y,
                tooltip.width,
                tooltip.height,
                theme.tooltip_background,
            )
            .with_corner_radius(TOOLTIP_CORNER_RADIUS_PX),
        );
        for (line_index, line) in tooltip.lines.iter().enumerate() {
            frame.push_text(
                CanvasLayerKind::Overlay,
                TextPrimitive::new(
                    line.clone(),
                    tooltip.x + layout.padding_px,
                    tooltip.y + layout.padding_px + line_index as f64 * layout.line_height_px,
                    layout.font_size_px,
                    theme.tooltip_text_color,
                    TextHAlign::Left,
                ),
            );
        }
    }
}
