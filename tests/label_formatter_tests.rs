use approx::assert_relative_eq;
use rust_decimal::Decimal;
use storefront_charts::api::{
    BarChart, BarChartConfig, compact_formatter, currency_formatter, format_compact,
    format_currency, format_percentage, format_truncated,
};
use storefront_charts::core::primitives::round_decimal;
use storefront_charts::core::{CategoricalBar, DataPoint, SegmentDatum, Viewport};
use storefront_charts::render::{CanvasLayerKind, NullRenderer};

#[test]
fn default_labels_truncate_toward_zero() {
    assert_eq!(format_truncated(12.9), "12");
    assert_eq!(format_truncated(-3.7), "-3");
    assert_eq!(format_truncated(0.4), "0");
}

#[test]
fn percentages_keep_one_decimal() {
    assert_eq!(format_percentage(30.0), "30.0%");
    assert_eq!(format_percentage(33.333), "33.3%");
}

#[test]
fn currency_groups_thousands_and_rounds_in_decimal_space() {
    assert_eq!(format_currency(1234.5, "$", 2), "$1,234.50");
    assert_eq!(format_currency(-1_234_567.891, "$", 2), "-$1,234,567.89");
    assert_eq!(format_currency(999.6, "$", 0), "$1,000");
    assert_eq!(format_currency(0.125, "€", 2), "€0.13");
    assert_eq!(format_currency(-0.001, "$", 2), "$0.00");
    assert_eq!(format_currency(12.0, "", 0), "12");
}

#[test]
fn compact_labels_use_magnitude_suffixes() {
    assert_eq!(format_compact(950.0), "950");
    assert_eq!(format_compact(1234.0), "1.2k");
    assert_eq!(format_compact(-2500.0), "-2.5k");
    assert_eq!(format_compact(3_000_000.0), "3M");
    assert_eq!(format_compact(7_300_000_000.0), "7.3B");
}

#[test]
fn formatters_plug_into_a_chart() {
    let config = BarChartConfig::new(Viewport::new(480, 320));
    let mut chart = BarChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_bars(vec![
        CategoricalBar::new("Jan", 1200.0),
        CategoricalBar::new("Feb", 2400.0),
    ]);

    chart.set_value_formatter(compact_formatter());
    let frame = chart.build_frame();
    let axis: Vec<&str> = frame
        .layer(CanvasLayerKind::Label)
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert!(axis.contains(&"2.4k"), "axis labels: {axis:?}");

    chart.set_value_formatter(currency_formatter("$", 0));
    let rect = chart.scene().projection.rects[1];
    chart.press(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5);
    assert_eq!(
        chart.tooltip().map(|tooltip| tooltip.lines.clone()),
        Some(vec!["Feb".to_owned(), "$2,400".to_owned()])
    );
}

#[test]
fn decimal_amounts_convert_at_the_edges() {
    let point = DataPoint::from_decimal("Mon", Decimal::new(1999, 2)).expect("point");
    assert_relative_eq!(point.y, 19.99, max_relative = 1e-12);

    let bar = CategoricalBar::from_decimal("Jan", Decimal::new(125_050, 2)).expect("bar");
    assert_eq!(bar.value, 1250.5);

    let segment = SegmentDatum::from_decimal("a", "Online", Decimal::new(30, 0)).expect("segment");
    assert_eq!(segment.value, 30.0);

    assert_eq!(round_decimal(1.25, 1), Some(Decimal::new(13, 1)));
    assert_eq!(round_decimal(f64::NAN, 2), None);
}
