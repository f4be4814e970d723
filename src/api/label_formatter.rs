use std::sync::Arc;

use crate::core::primitives::round_decimal;

/// Caller-supplied value label formatter shared by ticks, value labels and
/// tooltips.
pub type ValueFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Integer truncation, the formatter every chart starts with.
#[must_use]
pub fn format_truncated(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

#[must_use]
pub fn default_value_formatter() -> ValueFormatterFn {
    Arc::new(format_truncated)
}

#[must_use]
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.1}%")
}

/// Money label with thousands separators, e.g. `-$1,234.50`.
///
/// Rounding happens in decimal space so cent values do not drift.
#[must_use]
pub fn format_currency(value: f64, symbol: &str, decimals: u32) -> String {
    let Some(rounded) = round_decimal(value, decimals) else {
        return format_truncated(value);
    };
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}{symbol}{grouped}.{fraction}"),
        None => format!("{sign}{symbol}{grouped}"),
    }
}

#[must_use]
pub fn currency_formatter(symbol: impl Into<String>, decimals: u32) -> ValueFormatterFn {
    let symbol = symbol.into();
    Arc::new(move |value| format_currency(value, &symbol, decimals))
}

/// Short magnitude labels (`950`, `1.2k`, `3M`) for dense axes.
#[must_use]
pub fn format_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "k")];

    let magnitude = value.abs();
    for (scale, suffix) in UNITS {
        if magnitude >= scale {
            let scaled = format!("{:.1}", value / scale);
            let scaled = scaled.strip_suffix(".0").unwrap_or(&scaled);
            return format!("{scaled}{suffix}");
        }
    }
    format_truncated(value)
}

#[must_use]
pub fn compact_formatter() -> ValueFormatterFn {
    Arc::new(format_compact)
}
