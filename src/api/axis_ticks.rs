use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, ValueDomain};

use super::label_formatter::ValueFormatterFn;

/// One value-axis tick: the domain value, its pixel position on the value
/// axis and the formatted label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTick {
    pub value: f64,
    pub pixel: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTick {
    pub index: usize,
    pub pixel: f64,
    pub label: String,
}

/// `count` evenly spaced values from `domain.min` to `domain.max` inclusive.
///
/// A count below 2 still yields both domain ends.
#[must_use]
pub fn value_tick_values(domain: ValueDomain, count: usize) -> Vec<f64> {
    let count = count.max(2);
    let step = domain.span() / (count - 1) as f64;
    (0..count)
        .map(|index| {
            if index == count - 1 {
                domain.max
            } else {
                domain.min + step * index as f64
            }
        })
        .collect()
}

#[must_use]
pub fn build_value_ticks(
    domain: ValueDomain,
    count: usize,
    scale: LinearScale,
    formatter: &ValueFormatterFn,
) -> Vec<ValueTick> {
    value_tick_values(domain, count)
        .into_iter()
        .map(|value| ValueTick {
            value,
            pixel: scale.map(value),
            label: formatter(value),
        })
        .collect()
}

/// Indices of the category labels to draw: every `stride`-th label with
/// `stride = max(1, n / max_labels)`, plus the last one unconditionally.
#[must_use]
pub fn select_category_label_indices(category_count: usize, max_labels: usize) -> Vec<usize> {
    if category_count == 0 {
        return Vec::new();
    }
    let stride = (category_count / max_labels.max(1)).max(1);
    let last = category_count - 1;
    let mut indices: Vec<usize> = (0..category_count).step_by(stride).collect();
    if indices.last() != Some(&last) {
        indices.push(last);
    }
    indices
}

/// Down-sampled category ticks. `pixel_for` maps a category index to its
/// position on the category axis.
#[must_use]
pub fn build_category_ticks<F>(
    labels: &[String],
    max_labels: usize,
    pixel_for: F,
) -> Vec<CategoryTick>
where
    F: Fn(usize) -> f64,
{
    select_category_label_indices(labels.len(), max_labels)
        .into_iter()
        .map(|index| CategoryTick {
            index,
            pixel: pixel_for(index),
            label: labels[index].clone(),
        })
        .collect()
}
