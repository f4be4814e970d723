use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rounds a finite float to `decimals` places, midpoints away from zero.
#[must_use]
pub fn round_decimal(value: f64, decimals: u32) -> Option<Decimal> {
    Decimal::from_f64(value).map(|decimal| {
        decimal.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}
