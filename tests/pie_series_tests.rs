use approx::{assert_abs_diff_eq, assert_relative_eq};
use storefront_charts::core::{
    SegmentDatum, cartesian_to_polar, label_radius_ratio, polar_to_cartesian, project_pie,
};

fn channel_split() -> Vec<SegmentDatum> {
    vec![
        SegmentDatum::new("a", "Online", 30.0),
        SegmentDatum::new("b", "In store", 70.0),
    ]
}

#[test]
fn two_segments_start_at_twelve_o_clock_and_close_the_circle() {
    let geometry = project_pie(&channel_split(), 100.0, 100.0, 80.0, None);
    let a = &geometry.segments[0];
    let b = &geometry.segments[1];

    assert_eq!(geometry.total, 100.0);
    assert_abs_diff_eq!(a.start_angle_deg, -90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.end_angle_deg, 18.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.sweep_deg, 108.0, epsilon = 1e-9);
    assert_eq!(b.start_angle_deg, a.end_angle_deg);
    assert_abs_diff_eq!(b.end_angle_deg, 270.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b.sweep_deg, 252.0, epsilon = 1e-9);

    assert_relative_eq!(a.percentage, 30.0, max_relative = 1e-12);
    assert_relative_eq!(b.percentage, 70.0, max_relative = 1e-12);
    assert!(a.label_visible);
    assert!(b.label_visible);
}

#[test]
fn segments_keep_input_order_and_identity() {
    let segments = vec![
        SegmentDatum::new("z", "Z", 1.0),
        SegmentDatum::new("y", "Y", 2.0),
        SegmentDatum::new("x", "X", 3.0),
    ];
    let geometry = project_pie(&segments, 0.0, 0.0, 50.0, None);
    let ids: Vec<&str> = geometry
        .segments
        .iter()
        .map(|segment| segment.segment_id.as_str())
        .collect();
    assert_eq!(ids, vec!["z", "y", "x"]);
    assert!(
        geometry
            .segments
            .iter()
            .enumerate()
            .all(|(index, segment)| segment.index == index)
    );
}

#[test]
fn micro_segments_get_no_percentage_label() {
    let segments = vec![
        SegmentDatum::new("tiny", "Tiny", 1.0),
        SegmentDatum::new("small", "Small", 4.0),
        SegmentDatum::new("big", "Big", 95.0),
    ];
    let geometry = project_pie(&segments, 0.0, 0.0, 50.0, None);
    let visible: Vec<bool> = geometry
        .segments
        .iter()
        .map(|segment| segment.label_visible)
        .collect();
    assert_eq!(visible, vec![false, false, true]);
}

#[test]
fn pie_labels_sit_at_seventy_percent_of_the_radius() {
    let geometry = project_pie(&channel_split(), 10.0, 20.0, 100.0, None);
    for segment in &geometry.segments {
        let (radius, angle) = cartesian_to_polar(10.0, 20.0, segment.label_x, segment.label_y);
        assert_abs_diff_eq!(radius, 70.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angle, segment.mid_angle_deg(), epsilon = 1e-9);
    }
}

#[test]
fn donut_labels_move_into_the_ring() {
    let geometry = project_pie(&channel_split(), 0.0, 0.0, 100.0, Some(0.6));
    assert!(geometry.is_donut());
    assert_abs_diff_eq!(geometry.inner_radius, 60.0, epsilon = 1e-9);

    let ratio = label_radius_ratio(Some(0.6));
    assert!((0.7..=0.8).contains(&ratio));
    let segment = &geometry.segments[0];
    let (radius, _) = cartesian_to_polar(0.0, 0.0, segment.label_x, segment.label_y);
    assert_abs_diff_eq!(radius, 100.0 * ratio, epsilon = 1e-9);
    assert!(radius > geometry.inner_radius);

    assert_eq!(label_radius_ratio(Some(0.2)), 0.7);
}

#[test]
fn zero_total_is_an_empty_chart_not_an_error() {
    let segments = vec![
        SegmentDatum::new("a", "A", 0.0),
        SegmentDatum::new("b", "B", 0.0),
    ];
    let geometry = project_pie(&segments, 50.0, 50.0, 40.0, Some(0.5));
    assert!(geometry.segments.is_empty());
    assert_eq!(geometry.total, 0.0);

    let geometry = project_pie(&[], 50.0, 50.0, 40.0, None);
    assert!(geometry.segments.is_empty());
}

#[test]
fn single_segment_covers_the_full_turn() {
    let segments = vec![SegmentDatum::new("only", "Only", 12.0)];
    let geometry = project_pie(&segments, 0.0, 0.0, 40.0, None);
    let only = &geometry.segments[0];
    assert_eq!(only.start_angle_deg, -90.0);
    assert_eq!(only.end_angle_deg, 270.0);
    assert_eq!(only.sweep_deg, 360.0);
    assert_eq!(only.percentage, 100.0);
}

#[test]
fn negative_values_count_as_zero() {
    let segments = vec![
        SegmentDatum::new("refunds", "Refunds", -5.0),
        SegmentDatum::new("sales", "Sales", 10.0),
    ];
    let geometry = project_pie(&segments, 0.0, 0.0, 40.0, None);
    assert_eq!(geometry.total, 10.0);
    assert_eq!(geometry.segments[0].sweep_deg, 0.0);
    assert_eq!(geometry.segments[1].sweep_deg, 360.0);
}

#[test]
fn polar_conversion_round_trips_across_the_sweep() {
    for angle in [-89.0, -45.0, 0.0, 90.0, 179.0, 269.0] {
        let (x, y) = polar_to_cartesian(5.0, 5.0, 30.0, angle);
        let (radius, recovered) = cartesian_to_polar(5.0, 5.0, x, y);
        assert_abs_diff_eq!(radius, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered, angle, epsilon = 1e-9);
    }
}
