use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Largest domain bound magnitude; keeps `max - min` finite.
pub const MAX_DOMAIN_MAGNITUDE: f64 = f64::MAX / 2.0;

/// Affine map from a domain interval onto a pixel interval.
///
/// The pixel interval may be reversed (`range_start > range_end`), which is
/// how the value axis flips a bottom-left chart origin into top-left pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Infallible constructor: a degenerate domain is widened to a span of 1
    /// and non-finite bounds fall back to `0..1`.
    #[must_use]
    pub fn widened(domain_start: f64, domain_end: f64, range_start: f64, range_end: f64) -> Self {
        let (domain_start, domain_end) = if domain_start.is_finite() && domain_end.is_finite() {
            if domain_start == domain_end {
                (domain_start, domain_start + 1.0)
            } else if !(domain_end - domain_start).is_finite() {
                (
                    domain_start.clamp(-MAX_DOMAIN_MAGNITUDE, MAX_DOMAIN_MAGNITUDE),
                    domain_end.clamp(-MAX_DOMAIN_MAGNITUDE, MAX_DOMAIN_MAGNITUDE),
                )
            } else {
                (domain_start, domain_end)
            }
        } else {
            (0.0, 1.0)
        };
        let range_start = if range_start.is_finite() {
            range_start
        } else {
            0.0
        };
        let range_end = if range_end.is_finite() { range_end } else { 0.0 };

        Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Where the lower domain bound comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainBaseline {
    /// Bar and area contexts: the domain starts at zero.
    ZeroFloor,
    /// Line charts with a zero reference: `min(data_min, 0)`, so negative
    /// values stay visible.
    IncludeZero,
    /// Tight `data_min..data_max`.
    Data,
}

/// Value-axis bounds, always with `max > min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    /// Union min/max over `values`, non-finite entries ignored.
    ///
    /// An empty input yields `0..1`; a flat input is widened to a span of 1.
    /// Bounds whose span overflows are pulled in to
    /// [`MAX_DOMAIN_MAGNITUDE`].
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>, baseline: DomainBaseline) -> Self {
        let mut data_min = f64::INFINITY;
        let mut data_max = f64::NEG_INFINITY;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            data_min = data_min.min(value);
            data_max = data_max.max(value);
        }
        if data_min > data_max {
            data_min = 0.0;
            data_max = 0.0;
        }

        let mut min = match baseline {
            DomainBaseline::ZeroFloor => 0.0,
            DomainBaseline::IncludeZero => data_min.min(0.0),
            DomainBaseline::Data => data_min,
        };
        let mut max = match baseline {
            DomainBaseline::ZeroFloor => data_max.max(0.0),
            DomainBaseline::IncludeZero | DomainBaseline::Data => data_max,
        };
        if !(max - min).is_finite() {
            min = min.max(-MAX_DOMAIN_MAGNITUDE);
            max = max.min(MAX_DOMAIN_MAGNITUDE);
        }
        if max == min {
            max = min + 1.0;
        }

        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Plot rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Plot rectangle anchored at the origin.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Index and value mapping for one render pass of an ordered chart.
///
/// With the plot anchored at the origin:
/// `scale_index(i) = i / max(n - 1, 1) * width` and
/// `scale_value(v) = height - (v - min) / (max - min) * height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMapping {
    domain: ValueDomain,
    point_count: usize,
    index_scale: LinearScale,
    value_scale: LinearScale,
}

impl ScaleMapping {
    #[must_use]
    pub fn new(domain: ValueDomain, point_count: usize, plot: PlotRect) -> Self {
        let last_index = point_count.saturating_sub(1).max(1) as f64;
        Self {
            domain,
            point_count,
            index_scale: LinearScale::widened(0.0, last_index, plot.left, plot.right()),
            value_scale: LinearScale::widened(domain.min, domain.max, plot.bottom(), plot.top),
        }
    }

    #[must_use]
    pub fn domain(&self) -> ValueDomain {
        self.domain
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.value_scale
    }

    #[must_use]
    pub fn scale_index(&self, index: usize) -> f64 {
        self.index_scale.map(index as f64)
    }

    #[must_use]
    pub fn scale_value(&self, value: f64) -> f64 {
        self.value_scale.map(value)
    }

    /// Closest index to a horizontal pixel, clamped into `0..n`.
    #[must_use]
    pub fn nearest_index(&self, pixel_x: f64) -> Option<usize> {
        if self.point_count == 0 {
            return None;
        }
        let raw = self.index_scale.invert(pixel_x).round();
        let last = (self.point_count - 1) as f64;
        Some(raw.clamp(0.0, last) as usize)
    }

    #[must_use]
    pub fn pixel_to_value(&self, pixel_y: f64) -> f64 {
        self.value_scale.invert(pixel_y)
    }
}
