use std::cell::RefCell;
use std::rc::Rc;

use storefront_charts::ChartError;
use storefront_charts::api::{ChartEvent, DisplayFlags, LineChart, LineChartConfig};
use storefront_charts::core::{DataPoint, Series, Viewport};
use storefront_charts::extensions::{ChartPlugin, EventCallback};
use storefront_charts::interaction::{HitShape, HitTarget, ItemId};
use storefront_charts::render::{CanvasLayerKind, LineStrokeStyle, NullRenderer};

fn revenue() -> Series {
    Series::new(
        "revenue",
        "Revenue",
        vec![
            DataPoint::new(0.0, 10.0),
            DataPoint::new(1.0, 20.0),
            DataPoint::new(2.0, 15.0),
        ],
    )
}

fn forecast() -> Series {
    Series::new(
        "forecast",
        "Forecast",
        vec![
            DataPoint::new(0.0, 4.0),
            DataPoint::new(1.0, 6.0),
            DataPoint::new(2.0, 8.0),
        ],
    )
    .dashed(true)
}

fn chart_with(series: Vec<Series>) -> LineChart<NullRenderer> {
    let config = LineChartConfig::new(Viewport::new(480, 320));
    let mut chart = LineChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_series(series);
    chart
}

fn marker_position(chart: &LineChart<NullRenderer>, series: usize, point: usize) -> (f64, f64) {
    let scene = chart.scene();
    let marker = &scene.geometries[series].markers[point];
    (marker.x, marker.y)
}

fn recorder(id: &str) -> (Box<dyn ChartPlugin>, Rc<RefCell<Vec<ChartEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let plugin = EventCallback::new(id, move |event: &ChartEvent| {
        sink.borrow_mut().push(event.clone());
    });
    (Box::new(plugin), events)
}

#[test]
fn render_pass_validates_and_draws_every_series() {
    let mut chart = chart_with(vec![revenue(), forecast()]);
    chart.render().expect("render");

    let renderer = chart.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_series_layer_count, 4);
    assert!(renderer.last_text_count > 0);
    assert_eq!(chart.hit_regions().len(), 6 + 2);
}

#[test]
fn dashed_series_strokes_dashed_lines() {
    let mut chart = chart_with(vec![revenue(), forecast()]);
    let frame = chart.build_frame();
    let lines = &frame.layer(CanvasLayerKind::Series).lines;
    assert_eq!(lines.len(), 4);
    assert!(lines[..2].iter().all(|line| line.stroke_style == LineStrokeStyle::Solid));
    assert!(lines[2..].iter().all(|line| line.stroke_style == LineStrokeStyle::Dashed));
}

#[test]
fn pressing_a_marker_selects_its_point() {
    let mut chart = chart_with(vec![revenue()]);
    let (x, y) = marker_position(&chart, 0, 1);

    let event = chart.press(x, y).expect("point event");
    assert_eq!(
        event,
        ChartEvent::PointSelected {
            series_id: "revenue".to_owned(),
            point_index: 1,
            point: DataPoint::new(1.0, 20.0),
        }
    );
    assert_eq!(
        chart.selection().highlighted(),
        Some(&ItemId::Series("revenue".to_owned()))
    );

    let tooltip = chart.tooltip().expect("tooltip");
    assert_eq!(tooltip.lines, vec!["Revenue".to_owned(), "1: 20".to_owned()]);
    assert!(tooltip.x >= 0.0 && tooltip.y >= 0.0);
    assert!(tooltip.x + tooltip.width <= 480.0);
    assert!(tooltip.y + tooltip.height <= 320.0);
}

#[test]
fn pressing_the_same_marker_again_clears_the_selection() {
    let mut chart = chart_with(vec![revenue()]);
    let (x, y) = marker_position(&chart, 0, 2);

    chart.press(x, y).expect("select");
    assert_eq!(chart.press(x, y), Some(ChartEvent::SelectionCleared));
    assert!(chart.tooltip().is_none());
    assert!(!chart.selection().is_active());
}

#[test]
fn pressing_empty_space_is_ignored_until_something_is_selected() {
    let mut chart = chart_with(vec![revenue()]);
    assert_eq!(chart.press(1.0, 1.0), None);

    let (x, y) = marker_position(&chart, 0, 0);
    chart.press(x, y).expect("select");
    assert_eq!(chart.press(1.0, 1.0), Some(ChartEvent::SelectionCleared));
}

#[test]
fn tooltip_overlay_is_part_of_the_next_frame() {
    let mut chart = chart_with(vec![revenue()]);
    let (x, y) = marker_position(&chart, 0, 1);
    chart.press(x, y).expect("select");

    let frame = chart.build_frame();
    let overlay = frame.layer(CanvasLayerKind::Overlay);
    assert_eq!(overlay.rects.len(), 1);
    assert_eq!(overlay.texts.len(), 2);
    frame.validate().expect("valid frame");
}

#[test]
fn selection_dims_the_other_series() {
    let mut chart = chart_with(vec![revenue(), forecast()]);
    let (x, y) = marker_position(&chart, 0, 1);
    chart.press(x, y).expect("select");

    let frame = chart.build_frame();
    let lines = &frame.layer(CanvasLayerKind::Series).lines;
    assert!(lines[..2].iter().all(|line| line.color.alpha == 1.0));
    assert!(lines[2..].iter().all(|line| line.color.alpha == 0.5));

    let markers = &frame.layer(CanvasLayerKind::Marker).circles;
    assert!(markers[3..].iter().all(|circle| circle.fill_color.alpha == 0.5));
}

#[test]
fn legend_press_toggles_series_highlight() {
    let mut chart = chart_with(vec![revenue(), forecast()]);
    chart.render().expect("render");

    let (x, y) = chart
        .hit_regions()
        .iter()
        .find_map(|(target, region)| match (target, region.shape) {
            (
                HitTarget::Legend(ItemId::Series(id)),
                HitShape::Rect {
                    x,
                    y,
                    width,
                    height,
                },
            ) if id == "forecast" => Some((x + width * 0.5, y + height * 0.5)),
            _ => None,
        })
        .expect("legend entry for forecast");

    let id = ItemId::Series("forecast".to_owned());
    assert_eq!(
        chart.press(x, y),
        Some(ChartEvent::LegendToggled {
            id: id.clone(),
            active: true
        })
    );
    assert_eq!(chart.selection().highlighted(), Some(&id));
    assert!(chart.tooltip().is_none());

    assert_eq!(
        chart.press(x, y),
        Some(ChartEvent::LegendToggled { id, active: false })
    );
    assert!(!chart.selection().is_active());
}

#[test]
fn hidden_legend_registers_no_legend_regions() {
    let config = LineChartConfig::new(Viewport::new(480, 320))
        .with_flags(DisplayFlags::default().with_legend(false));
    let mut chart = LineChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_series(vec![revenue()]);
    chart.render().expect("render");

    assert!(
        chart
            .hit_regions()
            .iter()
            .all(|(target, _)| !matches!(target, HitTarget::Legend(_)))
    );
}

#[test]
fn new_series_identity_resets_the_selection() {
    let mut chart = chart_with(vec![revenue()]);
    let (x, y) = marker_position(&chart, 0, 1);
    chart.press(x, y).expect("select");

    let mut updated = revenue();
    updated.points[1].y = 22.0;
    chart.set_series(vec![updated]);
    assert!(chart.selection().is_active(), "same ids keep the selection");

    chart.set_series(vec![forecast()]);
    assert!(!chart.selection().is_active());
    assert!(chart.tooltip().is_none());
}

#[test]
fn bands_and_areas_land_on_the_fill_layer() {
    let config = LineChartConfig::new(Viewport::new(480, 320)).with_fill_area(true);
    let mut chart = LineChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_series(vec![
        revenue().with_confidence(vec![8.0, 16.0, 12.0], vec![12.0, 24.0, 18.0]),
    ]);

    let frame = chart.build_frame();
    assert_eq!(frame.layer(CanvasLayerKind::Fill).polygons.len(), 2);
    frame.validate().expect("valid frame");
}

#[test]
fn category_labels_come_from_point_labels() {
    let series = Series::new(
        "orders",
        "Orders",
        vec![
            DataPoint::new("Mon", 3.0),
            DataPoint::new("Tue", 5.0),
            DataPoint::new(2.0, 4.0).with_label("Wed"),
        ],
    );
    let mut chart = chart_with(vec![series]);
    let frame = chart.build_frame();
    let texts: Vec<&str> = frame.texts().map(|text| text.text.as_str()).collect();
    for label in ["Mon", "Tue", "Wed"] {
        assert!(texts.contains(&label), "missing category label {label}");
    }
}

#[test]
fn degenerate_inputs_render_without_errors() {
    let mut chart = chart_with(Vec::new());
    chart.render().expect("empty chart");
    assert_eq!(chart.renderer().last_series_layer_count, 0);

    chart.set_series(vec![Series::new("one", "One", vec![DataPoint::new(0.0, 7.0)])]);
    chart.render().expect("single point");
    assert_eq!(chart.renderer().last_series_layer_count, 0);
    assert_eq!(chart.hit_regions().len(), 2);

    chart.set_series(vec![Series::new("flat", "Flat", vec![DataPoint::new(0.0, 0.0); 4])]);
    chart.render().expect("flat series");
}

#[test]
fn extreme_magnitudes_render_inside_the_plot() {
    let mut chart = chart_with(vec![Series::new(
        "wide",
        "Wide",
        vec![DataPoint::new(0.0, -1e308), DataPoint::new(1.0, 1e308)],
    )]);
    chart.render().expect("extreme values render");

    let scene = chart.scene();
    let plot = scene.layout.plot;
    for marker in &scene.geometries[0].markers {
        assert!(marker.y.is_finite());
        assert!(marker.y >= plot.top - 1e-9 && marker.y <= plot.bottom() + 1e-9);
    }
}

#[test]
fn area_mode_clamps_negative_values_onto_the_zero_floor() {
    let config = LineChartConfig::new(Viewport::new(480, 320)).with_fill_area(true);
    let mut chart = LineChart::new(NullRenderer::default(), config).expect("chart init");
    chart.set_series(vec![Series::new(
        "net",
        "Net",
        vec![DataPoint::new(0.0, -50.0), DataPoint::new(1.0, 10.0)],
    )]);

    let scene = chart.scene();
    let plot = scene.layout.plot;
    let geometry = &scene.geometries[0];
    assert!((geometry.markers[0].y - plot.bottom()).abs() <= 1e-9);
    assert!((geometry.markers[1].y - plot.top).abs() <= 1e-9);
    let area = geometry.area.as_ref().expect("area polygon");
    assert!(area.iter().all(|(_, y)| *y <= plot.bottom() + 1e-9));

    let (x, y) = (geometry.markers[0].x, geometry.markers[0].y);
    let event = chart.press(x, y);
    assert!(matches!(
        event,
        Some(ChartEvent::PointSelected { point_index: 0, .. })
    ));
    chart.render().expect("render");
}

#[test]
fn plugins_observe_press_events() {
    let mut chart = chart_with(vec![revenue()]);
    let (plugin, events) = recorder("recorder");
    chart.register_plugin(plugin).expect("register");
    assert!(chart.has_plugin("recorder"));

    let (x, y) = marker_position(&chart, 0, 0);
    chart.press(x, y);
    chart.press(x, y);
    chart.press(1.0, 1.0);

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        ChartEvent::PointSelected { point_index: 0, .. }
    ));
    assert_eq!(events[1], ChartEvent::SelectionCleared);
}

#[test]
fn plugin_registry_rejects_empty_and_duplicate_ids() {
    let mut chart = chart_with(vec![revenue()]);
    let (plugin, _) = recorder("analytics");
    chart.register_plugin(plugin).expect("first");

    let (duplicate, _) = recorder("analytics");
    assert!(matches!(
        chart.register_plugin(duplicate),
        Err(ChartError::InvalidData(_))
    ));
    let (empty, _) = recorder("");
    assert!(chart.register_plugin(empty).is_err());

    assert_eq!(chart.plugin_count(), 1);
    assert!(chart.unregister_plugin("analytics"));
    assert!(!chart.unregister_plugin("analytics"));
    assert_eq!(chart.plugin_count(), 0);
}

#[test]
fn zero_sized_viewport_is_rejected() {
    let config = LineChartConfig::new(Viewport::new(0, 200));
    assert!(matches!(
        LineChart::new(NullRenderer::default(), config),
        Err(ChartError::InvalidViewport { width: 0, height: 200 })
    ));

    let mut chart = chart_with(vec![revenue()]);
    assert!(chart.set_viewport(Viewport::new(300, 0)).is_err());
    assert_eq!(chart.config().viewport, Viewport::new(480, 320));

    chart.set_viewport(Viewport::new(300, 200)).expect("resize");
    chart.render().expect("render after resize");
}
