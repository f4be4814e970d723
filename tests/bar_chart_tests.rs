use storefront_charts::api::{BarChart, BarChartConfig, ChartEvent, DisplayFlags};
use storefront_charts::core::{BarMode, BarOrientation, BarRect, CategoricalBar, Viewport};
use storefront_charts::interaction::{HitTarget, ItemId};
use storefront_charts::render::{CanvasLayerKind, NullRenderer};

fn monthly() -> Vec<CategoricalBar> {
    vec![
        CategoricalBar::new("Jan", 10.0),
        CategoricalBar::new("Feb", 20.0),
        CategoricalBar::new("Mar", 15.0),
    ]
}

fn channels() -> Vec<CategoricalBar> {
    vec![
        CategoricalBar::new("Jan", 0.0).with_group_values(vec![10.0, 20.0]),
        CategoricalBar::new("Feb", 0.0).with_group_values(vec![12.0, 6.0]),
    ]
}

fn chart(config: BarChartConfig, bars: Vec<CategoricalBar>) -> BarChart<NullRenderer> {
    let mut chart = BarChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_bars(bars);
    chart
}

fn center(rect: &BarRect) -> (f64, f64) {
    (rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
}

#[test]
fn single_bars_render_one_rect_per_category() {
    let mut chart = chart(BarChartConfig::new(Viewport::new(480, 320)), monthly());
    chart.render().expect("render");
    assert_eq!(chart.renderer().last_series_layer_count, 3);
    assert_eq!(chart.hit_regions().len(), 3 + 3);
}

#[test]
fn pressing_a_bar_reports_the_bar_and_its_index() {
    let mut chart = chart(BarChartConfig::new(Viewport::new(480, 320)), monthly());
    let scene = chart.scene();
    let (x, y) = center(&scene.projection.rects[1]);

    let event = chart.press(x, y).expect("bar event");
    assert_eq!(
        event,
        ChartEvent::BarPressed {
            bar: CategoricalBar::new("Feb", 20.0),
            index: 1,
            group_index: None,
        }
    );
    assert_eq!(chart.selection().highlighted(), Some(&ItemId::Bar(1)));

    let tooltip = chart.tooltip().expect("tooltip");
    assert_eq!(tooltip.lines, vec!["Feb".to_owned(), "20".to_owned()]);
    assert!(tooltip.x >= 0.0 && tooltip.x + tooltip.width <= 480.0);
    assert!(tooltip.y >= 0.0 && tooltip.y + tooltip.height <= 320.0);

    let frame = chart.build_frame();
    let rects = &frame.layer(CanvasLayerKind::Series).rects;
    assert_eq!(rects[1].fill_color.alpha, 1.0);
    assert_eq!(rects[0].fill_color.alpha, 0.5);
    assert_eq!(rects[2].fill_color.alpha, 0.5);
}

#[test]
fn stacked_press_highlights_the_whole_group() {
    let config = BarChartConfig::new(Viewport::new(480, 320))
        .with_mode(BarMode::Stacked)
        .with_group_labels(vec!["Online".to_owned(), "In store".to_owned()]);
    let mut chart = chart(config, channels());
    let scene = chart.scene();
    let rect = scene
        .projection
        .rects
        .iter()
        .find(|rect| rect.category_index == 0 && rect.group_index == Some(1))
        .copied()
        .expect("stacked segment");

    let (x, y) = center(&rect);
    let event = chart.press(x, y).expect("bar event");
    assert!(matches!(
        event,
        ChartEvent::BarPressed {
            index: 0,
            group_index: Some(1),
            ..
        }
    ));
    assert_eq!(chart.selection().highlighted(), Some(&ItemId::BarGroup(1)));
    assert_eq!(
        chart.tooltip().map(|tooltip| tooltip.lines.clone()),
        Some(vec!["Jan".to_owned(), "In store: 20".to_owned()])
    );

    let frame = chart.build_frame();
    for (drawn, projected) in frame
        .layer(CanvasLayerKind::Series)
        .rects
        .iter()
        .zip(&scene.projection.rects)
    {
        let expected = if projected.group_index == Some(1) { 1.0 } else { 0.5 };
        assert_eq!(drawn.fill_color.alpha, expected);
    }
}

#[test]
fn group_legend_falls_back_to_numbered_labels() {
    let config = BarChartConfig::new(Viewport::new(480, 320))
        .with_mode(BarMode::Grouped)
        .with_group_labels(vec!["Online".to_owned()]);
    let bars = vec![CategoricalBar::new("Jan", 0.0).with_group_values(vec![1.0, 2.0, 3.0])];
    let mut chart = chart(config, bars);
    let frame = chart.build_frame();

    let legend: Vec<&str> = frame
        .layer(CanvasLayerKind::Legend)
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(legend, vec!["Online", "Group 2", "Group 3"]);
}

#[test]
fn legend_press_toggles_a_group() {
    let config = BarChartConfig::new(Viewport::new(480, 320)).with_mode(BarMode::Grouped);
    let mut chart = chart(config, channels());
    chart.render().expect("render");

    let (x, y) = chart
        .hit_regions()
        .iter()
        .find(|(target, _)| **target == HitTarget::Legend(ItemId::BarGroup(0)))
        .map(|(_, region)| region.anchor)
        .expect("legend entry");

    assert_eq!(
        chart.press(x + 1.0, y + 2.0),
        Some(ChartEvent::LegendToggled {
            id: ItemId::BarGroup(0),
            active: true
        })
    );
}

#[test]
fn value_labels_show_bar_values_and_stack_totals() {
    let flags = DisplayFlags::default().with_values(true);
    let mut plain = chart(BarChartConfig::new(Viewport::new(480, 320)), monthly());
    let mut single = chart(
        BarChartConfig::new(Viewport::new(480, 320)).with_flags(flags),
        monthly(),
    );
    let without = plain.build_frame();
    let with = single.build_frame();
    let without = &without.layer(CanvasLayerKind::Label).texts;
    let with = &with.layer(CanvasLayerKind::Label).texts;
    assert_eq!(with.len(), without.len() + 3);
    let values: Vec<&str> = with[without.len()..]
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(values, vec!["10", "20", "15"]);

    let mut stacked = chart(
        BarChartConfig::new(Viewport::new(480, 320))
            .with_flags(flags)
            .with_mode(BarMode::Stacked),
        channels(),
    );
    let frame = stacked.build_frame();
    let labels: Vec<&str> = frame.texts().map(|text| text.text.as_str()).collect();
    assert!(labels.contains(&"30"));
    assert!(labels.contains(&"18"));
}

#[test]
fn horizontal_bars_grow_from_the_left_edge_of_the_plot() {
    let config =
        BarChartConfig::new(Viewport::new(480, 320)).with_orientation(BarOrientation::Horizontal);
    let mut chart = chart(config, monthly());
    let scene = chart.scene();
    let plot = scene.layout.plot;

    for rect in &scene.projection.rects {
        assert!((rect.x - plot.left).abs() <= 1e-9);
        assert!(rect.y >= plot.top && rect.y + rect.height <= plot.bottom() + 1e-9);
    }
    let widest = &scene.projection.rects[1];
    assert!((widest.width - plot.width).abs() <= 1e-9);

    let (x, y) = center(widest);
    assert!(matches!(
        chart.press(x, y),
        Some(ChartEvent::BarPressed { index: 1, .. })
    ));
    chart.render().expect("render");
}

#[test]
fn mode_switch_and_new_labels_reset_the_selection() {
    let mut chart = chart(BarChartConfig::new(Viewport::new(480, 320)), monthly());
    let (x, y) = center(&chart.scene().projection.rects[0]);
    chart.press(x, y).expect("select");

    let mut relabeled = monthly();
    relabeled[2].value = 30.0;
    chart.set_bars(relabeled);
    assert!(chart.selection().is_active(), "same labels keep the selection");

    let config = chart.config().clone().with_mode(BarMode::Stacked);
    chart.set_config(config).expect("set config");
    assert!(!chart.selection().is_active());

    let (x, y) = center(&chart.scene().projection.rects[0]);
    chart.press(x, y).expect("select again");
    chart.set_bars(vec![CategoricalBar::new("Q1", 5.0)]);
    assert!(!chart.selection().is_active());
}

#[test]
fn degenerate_collections_render() {
    let mut chart = chart(BarChartConfig::new(Viewport::new(320, 200)), Vec::new());
    chart.render().expect("empty");
    assert_eq!(chart.renderer().last_series_layer_count, 0);

    chart.set_bars(vec![CategoricalBar::new("Only", 0.0)]);
    chart.render().expect("single zero bar");
    assert_eq!(chart.renderer().last_series_layer_count, 1);

    let config = BarChartConfig::new(Viewport::new(320, 200)).with_mode(BarMode::Grouped);
    chart.set_config(config).expect("grouped");
    chart.set_bars(vec![CategoricalBar::new("Empty", 4.0).with_group_values(Vec::new())]);
    chart.render().expect("empty groups");
}

#[test]
fn many_categories_are_down_sampled_on_the_axis() {
    let bars: Vec<CategoricalBar> = (1..=14)
        .map(|day| CategoricalBar::new(format!("D{day}"), f64::from(day)))
        .collect();
    let config = BarChartConfig::new(Viewport::new(640, 320))
        .with_flags(DisplayFlags::default().with_legend(false));
    let chart = chart(config, bars);
    let scene = chart.scene();

    let indices: Vec<usize> = scene.category_ticks.iter().map(|tick| tick.index).collect();
    assert_eq!(indices, vec![0, 2, 4, 6, 8, 10, 12, 13]);
    assert_eq!(scene.category_ticks[7].label, "D14");
}
