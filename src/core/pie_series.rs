use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::SegmentDatum;

/// Twelve o'clock in screen space (y grows downward).
pub const PIE_START_ANGLE_DEG: f64 = -90.0;
/// Segments at or below this share get no percentage label.
pub const LABEL_VISIBILITY_THRESHOLD_PERCENT: f64 = 5.0;
pub const PIE_LABEL_RADIUS_RATIO: f64 = 0.7;
pub const DONUT_LABEL_RADIUS_RANGE: (f64, f64) = (0.7, 0.8);
pub const DEFAULT_DONUT_INNER_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSegmentGeometry {
    pub segment_id: String,
    pub index: usize,
    pub value: f64,
    pub percentage: f64,
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
    pub sweep_deg: f64,
    pub label_x: f64,
    pub label_y: f64,
    pub label_visible: bool,
}

impl PieSegmentGeometry {
    #[must_use]
    pub fn mid_angle_deg(&self) -> f64 {
        (self.start_angle_deg + self.end_angle_deg) * 0.5
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieGeometry {
    pub cx: f64,
    pub cy: f64,
    pub outer_radius: f64,
    /// Zero for a plain pie.
    pub inner_radius: f64,
    pub total: f64,
    pub segments: Vec<PieSegmentGeometry>,
}

impl PieGeometry {
    #[must_use]
    pub fn is_donut(&self) -> bool {
        self.inner_radius > 0.0
    }
}

/// Point at `angle_deg` on a circle, clockwise from three o'clock in screen
/// space.
#[must_use]
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let radians = angle_deg.to_radians();
    (cx + radius * radians.cos(), cy + radius * radians.sin())
}

/// Inverse of [`polar_to_cartesian`]: `(radius, angle_deg)` with the angle
/// normalized into `[-90, 270)` to match segment angles.
#[must_use]
pub fn cartesian_to_polar(cx: f64, cy: f64, x: f64, y: f64) -> (f64, f64) {
    let dx = x - cx;
    let dy = y - cy;
    let mut angle = dy.atan2(dx).to_degrees();
    if angle < PIE_START_ANGLE_DEG {
        angle += 360.0;
    }
    if angle >= PIE_START_ANGLE_DEG + 360.0 {
        angle -= 360.0;
    }
    (dx.hypot(dy), angle)
}

/// Label radius as a fraction of the outer radius: fixed for pies, the ring
/// midpoint (kept inside the label band) for donuts.
///
/// Donut labels therefore sit at or beyond the pie's 0.7: with the default
/// 0.6 hole the midpoint is 0.8, which keeps text on the ring instead of
/// over the hole.
#[must_use]
pub fn label_radius_ratio(inner_radius_ratio: Option<f64>) -> f64 {
    match inner_radius_ratio {
        Some(inner) if inner > 0.0 => {
            let (low, high) = DONUT_LABEL_RADIUS_RANGE;
            ((1.0 + inner) * 0.5).clamp(low, high)
        }
        _ => PIE_LABEL_RADIUS_RATIO,
    }
}

/// Lays segments out clockwise from twelve o'clock in input order.
///
/// Consecutive segments share their boundary angle exactly and the last one
/// ends at `-90 + 360`. A zero (or negative) total yields no segments.
#[must_use]
pub fn project_pie(
    segments: &[SegmentDatum],
    cx: f64,
    cy: f64,
    outer_radius: f64,
    inner_radius_ratio: Option<f64>,
) -> PieGeometry {
    let outer_radius = if outer_radius.is_finite() {
        outer_radius.max(0.0)
    } else {
        0.0
    };
    let inner_ratio = inner_radius_ratio
        .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
        .map(|ratio| ratio.min(0.95));
    let total: f64 = segments.iter().map(SegmentDatum::effective_value).sum();

    let mut geometry = PieGeometry {
        cx,
        cy,
        outer_radius,
        inner_radius: inner_ratio.map_or(0.0, |ratio| outer_radius * ratio),
        total,
        segments: Vec::with_capacity(segments.len()),
    };

    if total <= 0.0 || !total.is_finite() {
        if !segments.is_empty() {
            warn!(
                segments = segments.len(),
                "pie total is zero; rendering an empty chart"
            );
        }
        return geometry;
    }

    let label_radius = outer_radius * label_radius_ratio(inner_ratio);
    let full_turn_end = PIE_START_ANGLE_DEG + 360.0;
    let last_index = segments.len() - 1;
    let mut current_angle = PIE_START_ANGLE_DEG;

    for (index, segment) in segments.iter().enumerate() {
        let value = segment.effective_value();
        let percentage = value / total * 100.0;
        let sweep = percentage / 100.0 * 360.0;
        let start = current_angle;
        let end = if index == last_index {
            full_turn_end
        } else {
            start + sweep
        };
        let mid = (start + end) * 0.5;
        let (label_x, label_y) = polar_to_cartesian(cx, cy, label_radius, mid);

        geometry.segments.push(PieSegmentGeometry {
            segment_id: segment.id.clone(),
            index,
            value,
            percentage,
            start_angle_deg: start,
            end_angle_deg: end,
            sweep_deg: end - start,
            label_x,
            label_y,
            label_visible: percentage > LABEL_VISIBILITY_THRESHOLD_PERCENT,
        });
        current_angle = end;
    }

    geometry
}
