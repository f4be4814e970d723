//! Selection, hit-testing and tooltip placement.
//!
//! Every chart facade owns one [`InteractionState`]; nothing here is shared
//! across chart instances.

pub mod hit_test;
pub mod tooltip;

use serde::{Deserialize, Serialize};

pub use hit_test::{HitRegion, HitRegionTable, HitResolution, HitShape, HitTarget};
pub use tooltip::{TooltipAnchor, TooltipLayout, place_tooltip};

/// Opacity applied to primitives that do not match an active selection.
pub const DIMMED_OPACITY: f64 = 0.5;

/// Identity a legend entry or primitive can be highlighted by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    Series(String),
    Bar(usize),
    BarGroup(usize),
    Segment(String),
}

/// Opacity of a primitive identified by `primitive` under `selection`.
#[must_use]
pub fn primitive_opacity(primitive: &ItemId, selection: Option<&ItemId>) -> f64 {
    match selection {
        Some(selected) if selected != primitive => DIMMED_OPACITY,
        _ => 1.0,
    }
}

/// At most one highlighted identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    highlighted: Option<ItemId>,
}

impl SelectionState {
    #[must_use]
    pub fn highlighted(&self) -> Option<&ItemId> {
        self.highlighted.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.highlighted.is_some()
    }

    pub fn select(&mut self, id: ItemId) {
        self.highlighted = Some(id);
    }

    /// Deselect-on-repeat: toggling the highlighted id clears it, any other id
    /// replaces it. Returns whether `id` is highlighted afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.highlighted.as_ref() == Some(&id) {
            self.highlighted = None;
            false
        } else {
            self.highlighted = Some(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.highlighted = None;
    }

    #[must_use]
    pub fn opacity_for(&self, primitive: &ItemId) -> f64 {
        primitive_opacity(primitive, self.highlighted())
    }

    /// Full opacity when any of the primitive's identities is highlighted.
    #[must_use]
    pub fn opacity_for_any(&self, identities: &[ItemId]) -> f64 {
        identities
            .iter()
            .map(|id| self.opacity_for(id))
            .fold(if self.is_active() { DIMMED_OPACITY } else { 1.0 }, f64::max)
    }
}

/// Result of routing one press through the interaction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PressOutcome {
    Selected(HitTarget),
    LegendToggled { id: ItemId, active: bool },
    Cleared,
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    selection: SelectionState,
    selected_target: Option<HitTarget>,
    last_press: Option<(f64, f64)>,
}

impl InteractionState {
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn selected_target(&self) -> Option<&HitTarget> {
        self.selected_target.as_ref()
    }

    #[must_use]
    pub fn last_press(&self) -> Option<(f64, f64)> {
        self.last_press
    }

    /// Routes a press that resolved to `target` (or to nothing).
    pub fn on_press(&mut self, x: f64, y: f64, target: Option<HitTarget>) -> PressOutcome {
        self.last_press = Some((x, y));
        match target {
            Some(HitTarget::Legend(id)) => {
                self.selected_target = None;
                let active = self.selection.toggle(id.clone());
                PressOutcome::LegendToggled { id, active }
            }
            Some(target) if self.selected_target.as_ref() == Some(&target) => {
                self.reset();
                PressOutcome::Cleared
            }
            Some(target) => {
                self.selection.select(target.highlight_id());
                self.selected_target = Some(target.clone());
                PressOutcome::Selected(target)
            }
            None if self.selection.is_active() || self.selected_target.is_some() => {
                self.reset();
                PressOutcome::Cleared
            }
            None => PressOutcome::Ignored,
        }
    }

    /// Drops selection and tooltip target, e.g. when the chart data identity
    /// changes.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.selected_target = None;
    }
}
