use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;
use crate::render::Color;

/// Fallback stroke/fill for series that were not given a color.
pub const DEFAULT_SERIES_COLOR: Color = Color::rgb(0.310, 0.275, 0.898);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// X position of a data point. Placement is always index based; the value
/// only feeds labels and tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Time(DateTime<Utc>),
    Category(String),
}

impl XValue {
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            XValue::Number(value) if value.fract() == 0.0 => format!("{value:.0}"),
            XValue::Number(value) => format!("{value}"),
            XValue::Time(time) => time.format("%b %d").to_string(),
            XValue::Category(label) => label.clone(),
        }
    }

    /// Numeric reading of the value, when one exists.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            XValue::Number(value) => Some(*value),
            XValue::Time(time) => Some(datetime_to_unix_seconds(*time)),
            XValue::Category(_) => None,
        }
    }
}

impl From<f64> for XValue {
    fn from(value: f64) -> Self {
        XValue::Number(value)
    }
}

impl From<&str> for XValue {
    fn from(value: &str) -> Self {
        XValue::Category(value.to_owned())
    }
}

impl From<String> for XValue {
    fn from(value: String) -> Self {
        XValue::Category(value)
    }
}

impl From<DateTime<Utc>> for XValue {
    fn from(value: DateTime<Utc>) -> Self {
        XValue::Time(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: XValue,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: impl Into<XValue>, y: f64) -> Self {
        Self {
            x: x.into(),
            y,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn from_decimal(x: impl Into<XValue>, amount: Decimal) -> ChartResult<Self> {
        Ok(Self::new(x, decimal_to_f64(amount, "amount")?))
    }

    pub fn from_decimal_time(time: DateTime<Utc>, amount: Decimal) -> ChartResult<Self> {
        Self::from_decimal(time, amount)
    }

    /// Label shown on the category axis and in tooltips.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.x.label())
    }
}

/// Named, colored, ordered sequence of points plotted as one line/band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: String,
    pub name: String,
    #[serde(rename = "data")]
    pub points: Vec<DataPoint>,
    #[serde(default = "default_series_color")]
    pub color: Color,
    #[serde(default)]
    pub dashed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_upper: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_lower: Option<Vec<f64>>,
}

fn default_series_color() -> Color {
    DEFAULT_SERIES_COLOR
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points,
            color: DEFAULT_SERIES_COLOR,
            dashed: false,
            confidence_upper: None,
            confidence_lower: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        self.confidence_lower = Some(lower);
        self.confidence_upper = Some(upper);
        self
    }

    /// Confidence bounds usable for a band: both present and both matching
    /// the data length. Anything else suppresses the band.
    #[must_use]
    pub fn confidence_band(&self) -> Option<(&[f64], &[f64])> {
        let lower = self.confidence_lower.as_deref()?;
        let upper = self.confidence_upper.as_deref()?;
        if lower.len() != self.points.len() || upper.len() != self.points.len() {
            return None;
        }
        Some((lower, upper))
    }

    /// Every value that participates in the value-axis domain, band included.
    pub fn domain_values(&self) -> impl Iterator<Item = f64> + '_ {
        let band = self.confidence_band();
        let lower = band.map(|(lower, _)| lower).unwrap_or(&[]);
        let upper = band.map(|(_, upper)| upper).unwrap_or(&[]);
        self.points
            .iter()
            .map(|point| point.y)
            .chain(lower.iter().copied())
            .chain(upper.iter().copied())
    }
}

/// One category of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoricalBar {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_values: Option<Vec<f64>>,
}

impl CategoricalBar {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
            group_values: None,
        }
    }

    pub fn from_decimal(label: impl Into<String>, amount: Decimal) -> ChartResult<Self> {
        Ok(Self::new(label, decimal_to_f64(amount, "bar value")?))
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_group_values(mut self, group_values: Vec<f64>) -> Self {
        self.group_values = Some(group_values);
        self
    }

    /// Group values for grouped/stacked modes; a bar without groups acts as
    /// a single group holding `value`.
    #[must_use]
    pub fn groups(&self) -> &[f64] {
        match &self.group_values {
            Some(values) => values,
            None => std::slice::from_ref(&self.value),
        }
    }

    /// Rendered length in stacked mode.
    #[must_use]
    pub fn stacked_total(&self) -> f64 {
        self.groups()
            .iter()
            .filter(|value| value.is_finite())
            .map(|value| value.max(0.0))
            .sum()
    }

    /// Tallest sub-bar in grouped mode.
    #[must_use]
    pub fn grouped_max(&self) -> f64 {
        self.groups()
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    }
}

/// One wedge of a pie/donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDatum {
    pub id: String,
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl SegmentDatum {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn from_decimal(
        id: impl Into<String>,
        label: impl Into<String>,
        amount: Decimal,
    ) -> ChartResult<Self> {
        Ok(Self::new(id, label, decimal_to_f64(amount, "segment value")?))
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Value used for angles; negative or non-finite input counts as zero.
    #[must_use]
    pub fn effective_value(&self) -> f64 {
        if self.value.is_finite() {
            self.value.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_confidence_lengths_suppress_band() {
        let series = Series::new(
            "revenue",
            "Revenue",
            vec![DataPoint::new(0.0, 1.0), DataPoint::new(1.0, 2.0)],
        )
        .with_confidence(vec![0.5], vec![1.5, 2.5]);
        assert!(series.confidence_band().is_none());
    }

    #[test]
    fn bar_without_groups_acts_as_single_group() {
        let bar = CategoricalBar::new("Jan", 12.0);
        assert_eq!(bar.groups(), &[12.0]);
        assert_eq!(bar.stacked_total(), 12.0);
        assert_eq!(bar.grouped_max(), 12.0);
    }

    #[test]
    fn x_value_labels_follow_their_kind() {
        assert_eq!(XValue::Number(3.0).label(), "3");
        assert_eq!(XValue::Number(2.5).label(), "2.5");
        assert_eq!(XValue::from("Mon").label(), "Mon");
    }
}
