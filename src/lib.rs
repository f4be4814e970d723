//! storefront-charts: chart geometry engine for merchant dashboards.
//!
//! Line/area charts with confidence bands, single/grouped/stacked bar charts
//! in either orientation, and pie/donut charts are built from plain layout
//! primitives (lines, rectangles, polygons, circles, sectors, text). Every
//! render pass is a pure recomputation: scale, shapes, ticks, legend state,
//! hit regions. Pointer presses flow back through the hit-region table into
//! the per-chart selection state.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{BarChart, ChartEvent, LineChart, PieChart};
pub use error::{ChartError, ChartResult};
