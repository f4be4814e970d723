use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{ScaleMapping, Series};

pub const DEFAULT_MARKER_RADIUS_PX: f64 = 4.0;

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Fixed-radius marker drawn on every data point, carrying hit-test identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    pub series_id: String,
    pub point_index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Close,
}

/// Confidence band outline: upper bound left to right, then lower bound
/// right to left. Holds `2 * n` vertices; the closing edge is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPolygon {
    pub vertices: Vec<(f64, f64)>,
}

impl BandPolygon {
    #[must_use]
    pub fn path_commands(&self) -> Vec<PathCommand> {
        let Some((first, rest)) = self.vertices.split_first() else {
            return Vec::new();
        };
        let mut commands = Vec::with_capacity(self.vertices.len() + 1);
        commands.push(PathCommand::MoveTo {
            x: first.0,
            y: first.1,
        });
        commands.extend(rest.iter().map(|(x, y)| PathCommand::LineTo { x: *x, y: *y }));
        commands.push(PathCommand::Close);
        commands
    }

    /// SVG path data (`M .. L .. Z`), mostly for debugging and snapshots.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let mut path = String::new();
        for command in self.path_commands() {
            if !path.is_empty() {
                path.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match command {
                PathCommand::MoveTo { x, y } => write!(path, "M{x:.2},{y:.2}"),
                PathCommand::LineTo { x, y } => write!(path, "L{x:.2},{y:.2}"),
                PathCommand::Close => write!(path, "Z"),
            };
        }
        path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineProjectionOptions {
    pub marker_radius_px: f64,
    /// Emit a fill polygon between the line and the zero baseline.
    pub fill_area: bool,
}

impl Default for LineProjectionOptions {
    fn default() -> Self {
        Self {
            marker_radius_px: DEFAULT_MARKER_RADIUS_PX,
            fill_area: false,
        }
    }
}

/// Renderable geometry for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeriesGeometry {
    pub series_id: String,
    pub dashed: bool,
    pub segments: Vec<LineSegment>,
    pub markers: Vec<PointMarker>,
    pub band: Option<BandPolygon>,
    pub area: Option<Vec<(f64, f64)>>,
}

impl LineSeriesGeometry {
    #[must_use]
    pub fn empty(series: &Series) -> Self {
        Self {
            series_id: series.id.clone(),
            dashed: series.dashed,
            segments: Vec::new(),
            markers: Vec::new(),
            band: None,
            area: None,
        }
    }
}

/// Projects one series into polyline segments, point markers, an optional
/// confidence band and an optional area fill.
///
/// Points are placed by index. Non-finite values break the polyline and get
/// no marker. Values outside the mapping's domain (negative values under a
/// zero floor, overflowing magnitudes) are clamped onto its edge.
///
/// The function is deterministic and side-effect free.
#[must_use]
pub fn project_line_series(
    series: &Series,
    mapping: &ScaleMapping,
    options: LineProjectionOptions,
) -> LineSeriesGeometry {
    let mut geometry = LineSeriesGeometry::empty(series);
    if series.points.is_empty() {
        return geometry;
    }

    let mapped: Vec<Option<(f64, f64)>> = series
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            point
                .y
                .is_finite()
                .then(|| (mapping.scale_index(index), scaled_value(mapping, point.y)))
        })
        .collect();

    for pair in mapped.windows(2) {
        if let (Some(start), Some(end)) = (pair[0], pair[1]) {
            geometry.segments.push(LineSegment {
                x1: start.0,
                y1: start.1,
                x2: end.0,
                y2: end.1,
            });
        }
    }

    geometry.markers = mapped
        .iter()
        .enumerate()
        .filter_map(|(point_index, position)| {
            position.map(|(x, y)| PointMarker {
                series_id: series.id.clone(),
                point_index,
                x,
                y,
                radius: options.marker_radius_px,
            })
        })
        .collect();

    geometry.band = project_band(series, mapping);

    if options.fill_area {
        let baseline_y = mapping.scale_value(mapping.domain().clamp(0.0));
        let line: Vec<(f64, f64)> = mapped.iter().flatten().copied().collect();
        if line.len() >= 2 {
            let first_x = line[0].0;
            let last_x = line[line.len() - 1].0;
            let mut polygon = Vec::with_capacity(line.len() + 2);
            polygon.push((first_x, baseline_y));
            polygon.extend(line.iter().copied());
            polygon.push((last_x, baseline_y));
            geometry.area = Some(polygon);
        }
    }

    geometry
}

/// Projects every series against one shared mapping, in input order.
#[must_use]
pub fn project_all_series(
    series: &[Series],
    mapping: &ScaleMapping,
    options: LineProjectionOptions,
) -> Vec<LineSeriesGeometry> {
    #[cfg(feature = "parallel-projection")]
    {
        series
            .par_iter()
            .map(|entry| project_line_series(entry, mapping, options))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        series
            .iter()
            .map(|entry| project_line_series(entry, mapping, options))
            .collect()
    }
}

fn scaled_value(mapping: &ScaleMapping, value: f64) -> f64 {
    mapping.scale_value(mapping.domain().clamp(value))
}

fn project_band(series: &Series, mapping: &ScaleMapping) -> Option<BandPolygon> {
    if series.confidence_lower.is_none() || series.confidence_upper.is_none() {
        return None;
    }
    let Some((lower, upper)) = series.confidence_band() else {
        warn!(
            series_id = %series.id,
            points = series.points.len(),
            lower = series.confidence_lower.as_ref().map_or(0, Vec::len),
            upper = series.confidence_upper.as_ref().map_or(0, Vec::len),
            "skipping confidence band with mismatched bound lengths"
        );
        return None;
    };
    if lower.iter().chain(upper).any(|value| !value.is_finite()) {
        warn!(series_id = %series.id, "skipping confidence band with non-finite bounds");
        return None;
    }

    let mut vertices = Vec::with_capacity(upper.len() * 2);
    vertices.extend(
        upper
            .iter()
            .enumerate()
            .map(|(index, value)| (mapping.scale_index(index), scaled_value(mapping, *value))),
    );
    vertices.extend(
        lower
            .iter()
            .enumerate()
            .rev()
            .map(|(index, value)| (mapping.scale_index(index), scaled_value(mapping, *value))),
    );
    Some(BandPolygon { vertices })
}
