use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::cartesian_to_polar;

use super::ItemId;

/// Extra slack around line markers so small targets stay pressable.
pub const DEFAULT_MARKER_TOLERANCE_PX: f64 = 8.0;

/// Identity carried by a registered primitive; enough to re-derive the
/// originating data point, bar or segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTarget {
    Point {
        series_id: String,
        point_index: usize,
    },
    Bar {
        category_index: usize,
        group_index: Option<usize>,
    },
    Segment {
        segment_id: String,
        index: usize,
    },
    Legend(ItemId),
}

impl HitTarget {
    /// The identifier a press on this target highlights.
    #[must_use]
    pub fn highlight_id(&self) -> ItemId {
        match self {
            HitTarget::Point { series_id, .. } => ItemId::Series(series_id.clone()),
            HitTarget::Bar {
                category_index,
                group_index: None,
            } => ItemId::Bar(*category_index),
            HitTarget::Bar {
                group_index: Some(group_index),
                ..
            } => ItemId::BarGroup(*group_index),
            HitTarget::Segment { segment_id, .. } => ItemId::Segment(segment_id.clone()),
            HitTarget::Legend(id) => id.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitShape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Circular marker; matches within `radius + tolerance`, nearest wins.
    Marker { cx: f64, cy: f64, radius: f64 },
    /// Annular wedge, angles as produced by the pie generator.
    Sector {
        cx: f64,
        cy: f64,
        inner_radius: f64,
        outer_radius: f64,
        start_angle_deg: f64,
        end_angle_deg: f64,
    },
}

impl HitShape {
    /// Distance used for ranking, or `None` when the point misses.
    ///
    /// Containment counts as distance zero.
    #[must_use]
    pub fn distance(&self, x: f64, y: f64, tolerance: f64) -> Option<f64> {
        match *self {
            HitShape::Rect {
                x: left,
                y: top,
                width,
                height,
            } => {
                let inside = x >= left && x <= left + width && y >= top && y <= top + height;
                inside.then_some(0.0)
            }
            HitShape::Marker { cx, cy, radius } => {
                let distance = (x - cx).hypot(y - cy);
                (distance <= radius + tolerance).then_some(distance)
            }
            HitShape::Sector {
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle_deg,
                end_angle_deg,
            } => {
                let (radius, angle) = cartesian_to_polar(cx, cy, x, y);
                let in_ring = radius >= inner_radius && radius <= outer_radius;
                let in_sweep = angle >= start_angle_deg && angle < end_angle_deg;
                (in_ring && in_sweep).then_some(0.0)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    pub shape: HitShape,
    /// Point the tooltip is anchored to when this region is selected.
    pub anchor: (f64, f64),
}

impl HitRegion {
    #[must_use]
    pub fn new(shape: HitShape, anchor: (f64, f64)) -> Self {
        Self { shape, anchor }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitResolution<'a> {
    pub target: &'a HitTarget,
    pub region: &'a HitRegion,
    pub distance: f64,
}

/// Hit regions of one render pass, keyed by target in registration (draw)
/// order. The table is rebuilt from scratch on every render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitRegionTable {
    regions: IndexMap<HitTarget, HitRegion>,
    marker_tolerance_px: f64,
}

impl HitRegionTable {
    #[must_use]
    pub fn new(marker_tolerance_px: f64) -> Self {
        Self {
            regions: IndexMap::new(),
            marker_tolerance_px: marker_tolerance_px.max(0.0),
        }
    }

    pub fn register(&mut self, target: HitTarget, region: HitRegion) {
        self.regions.insert(target, region);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    pub fn get(&self, target: &HitTarget) -> Option<&HitRegion> {
        self.regions.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HitTarget, &HitRegion)> {
        self.regions.iter()
    }

    /// Resolves a pointer position to the closest matching region.
    ///
    /// Rects and sectors match by containment, markers by proximity. Equal
    /// distances go to the region registered last, i.e. the one drawn on top.
    #[must_use]
    pub fn resolve(&self, x: f64, y: f64) -> Option<HitResolution<'_>> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let candidates: SmallVec<[(OrderedFloat<f64>, usize); 4]> = self
            .regions
            .values()
            .enumerate()
            .filter_map(|(order, region)| {
                region
                    .shape
                    .distance(x, y, self.marker_tolerance_px)
                    .map(|distance| (OrderedFloat(distance), order))
            })
            .collect();
        trace!(x, y, candidates = candidates.len(), "resolve hit regions");

        let (distance, order) = candidates
            .into_iter()
            .min_by(|left, right| left.0.cmp(&right.0).then(right.1.cmp(&left.1)))?;
        let (target, region) = self.regions.get_index(order)?;
        Some(HitResolution {
            target,
            region,
            distance: distance.into_inner(),
        })
    }
}
