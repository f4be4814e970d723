pub mod bar_series;
pub mod line_series;
pub mod pie_series;
pub mod primitives;
pub mod scale;
pub mod types;

pub use bar_series::{
    BarMode, BarOrientation, BarProjection, BarRect, BarSpacing, BarValueAnchor, bar_domain,
    bar_extent_value, project_bars,
};
pub use line_series::{
    BandPolygon, LineProjectionOptions, LineSegment, LineSeriesGeometry, PathCommand,
    PointMarker, project_all_series, project_line_series,
};
pub use pie_series::{
    PieGeometry, PieSegmentGeometry, cartesian_to_polar, label_radius_ratio, polar_to_cartesian,
    project_pie,
};
pub use scale::{DomainBaseline, LinearScale, PlotRect, ScaleMapping, ValueDomain};
pub use types::{CategoricalBar, DataPoint, SegmentDatum, Series, Viewport, XValue};
