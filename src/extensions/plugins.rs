use serde::{Deserialize, Serialize};

use crate::api::ChartFamily;
use crate::core::{CategoricalBar, DataPoint, SegmentDatum, Viewport};
use crate::interaction::ItemId;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub family: ChartFamily,
    pub viewport: Viewport,
    pub highlighted: Option<ItemId>,
    pub hit_regions: usize,
}

/// Events emitted synchronously from the hit-test layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    PointSelected {
        series_id: String,
        point_index: usize,
        point: DataPoint,
    },
    BarPressed {
        bar: CategoricalBar,
        index: usize,
        group_index: Option<usize>,
    },
    SegmentPressed {
        segment: SegmentDatum,
        index: usize,
    },
    LegendToggled {
        id: ItemId,
        active: bool,
    },
    SelectionCleared,
}

/// Extension hook interface for host reactions to chart presses.
///
/// Plugins observe events and read chart context without mutating chart
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: &PluginContext);
}

/// Adapts a closure into a [`ChartPlugin`].
pub struct EventCallback<F> {
    id: String,
    callback: F,
}

impl<F> EventCallback<F>
where
    F: FnMut(&ChartEvent),
{
    #[must_use]
    pub fn new(id: impl Into<String>, callback: F) -> Self {
        Self {
            id: id.into(),
            callback,
        }
    }
}

impl<F> ChartPlugin for EventCallback<F>
where
    F: FnMut(&ChartEvent),
{
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &ChartEvent, _context: &PluginContext) {
        (self.callback)(event);
    }
}
