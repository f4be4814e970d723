use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use storefront_charts::api::{BarChart, BarChartConfig, LineChart, LineChartConfig};
use storefront_charts::core::{
    BarMode, BarOrientation, BarSpacing, CategoricalBar, DataPoint, DomainBaseline,
    LineProjectionOptions, PlotRect, ScaleMapping, SegmentDatum, Series, ValueDomain, Viewport,
    bar_domain, project_bars, project_line_series, project_pie,
};
use storefront_charts::render::NullRenderer;

fn revenue_series(points: usize) -> Series {
    let values: Vec<f64> = (0..points)
        .map(|i| {
            let t = i as f64;
            1_000.0 + (t * 0.05).sin() * 250.0 + t * 0.1
        })
        .collect();
    let lower = values.iter().map(|value| value * 0.9).collect();
    let upper = values.iter().map(|value| value * 1.1).collect();
    Series::new(
        "revenue",
        "Revenue",
        values
            .iter()
            .enumerate()
            .map(|(i, value)| DataPoint::new(i as f64, *value))
            .collect(),
    )
    .with_confidence(lower, upper)
}

fn bench_line_projection_10k(c: &mut Criterion) {
    let series = revenue_series(10_000);
    let domain = ValueDomain::from_values(
        series.points.iter().map(|point| point.y * 1.1),
        DomainBaseline::IncludeZero,
    );
    let mapping = ScaleMapping::new(domain, series.points.len(), PlotRect::sized(1920.0, 1080.0));

    c.bench_function("line_projection_with_band_10k", |b| {
        b.iter(|| {
            let _ = project_line_series(
                black_box(&series),
                black_box(&mapping),
                black_box(LineProjectionOptions {
                    marker_radius_px: 4.0,
                    fill_area: true,
                }),
            );
        })
    });
}

fn bench_stacked_bars_2k(c: &mut Criterion) {
    let bars: Vec<CategoricalBar> = (0..2_000)
        .map(|i| {
            let t = i as f64;
            CategoricalBar::new(format!("C{i}"), 0.0).with_group_values(vec![
                t % 17.0,
                t % 23.0 + 1.0,
                t % 5.0 * 3.0,
            ])
        })
        .collect();
    let plot = PlotRect::new(48.0, 16.0, 1800.0, 900.0);
    let domain = bar_domain(&bars, BarMode::Stacked);

    c.bench_function("stacked_bar_projection_2k", |b| {
        b.iter(|| {
            let _ = project_bars(
                black_box(&bars),
                BarMode::Stacked,
                BarOrientation::Vertical,
                black_box(plot),
                black_box(domain),
                BarSpacing::default(),
            );
        })
    });
}

fn bench_pie_projection_64(c: &mut Criterion) {
    let segments: Vec<SegmentDatum> = (0..64)
        .map(|i| SegmentDatum::new(format!("s{i}"), format!("Segment {i}"), f64::from(i + 1)))
        .collect();

    c.bench_function("donut_projection_64", |b| {
        b.iter(|| {
            let _ = project_pie(
                black_box(&segments),
                black_box(400.0),
                black_box(300.0),
                black_box(240.0),
                Some(0.6),
            );
        })
    });
}

fn bench_line_chart_render_2k(c: &mut Criterion) {
    let config = LineChartConfig::new(Viewport::new(1600, 900)).with_fill_area(true);
    let mut chart = LineChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_series(vec![revenue_series(2_000)]);

    c.bench_function("line_chart_render_2k", |b| {
        b.iter(|| {
            chart.render().expect("render should succeed");
        })
    });
}

fn bench_bar_chart_press(c: &mut Criterion) {
    let config = BarChartConfig::new(Viewport::new(1200, 600)).with_mode(BarMode::Grouped);
    let mut chart = BarChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_bars(
        (0..120)
            .map(|i| {
                CategoricalBar::new(format!("D{i}"), 0.0)
                    .with_group_values(vec![f64::from(i), f64::from(i % 7)])
            })
            .collect(),
    );
    chart.render().expect("initial render");

    c.bench_function("bar_chart_press_resolve", |b| {
        b.iter(|| {
            let _ = chart.press(black_box(600.0), black_box(500.0));
        })
    });
}

criterion_group!(
    benches,
    bench_line_projection_10k,
    bench_stacked_bars_2k,
    bench_pie_projection_64,
    bench_line_chart_render_2k,
    bench_bar_chart_press
);
criterion_main!(benches);
