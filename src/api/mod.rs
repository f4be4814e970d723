//! Chart facades and everything a render pass needs beyond raw geometry:
//! configuration, formatters, axis ticks, plot layout and legends.

mod bar_chart;
mod cartesian;
mod chart_core;
mod line_chart;
mod pie_chart;

pub mod axis_ticks;
pub mod chart_config;
pub mod json_contract;
pub mod label_formatter;
pub mod legend;
pub mod plot_layout;

pub use axis_ticks::{
    CategoryTick, ValueTick, build_category_ticks, build_value_ticks,
    select_category_label_indices, value_tick_values,
};
pub use bar_chart::{BarChart, BarScene, build_bar_scene};
pub use chart_config::{
    BarChartConfig, CenterLabel, ChartFamily, ChartTheme, DEFAULT_MAX_CATEGORY_LABELS,
    DEFAULT_VALUE_TICK_COUNT, DisplayFlags, LineChartConfig, PieChartConfig,
};
pub use json_contract::{
    CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1, parse_bars_json, parse_segments_json,
    parse_series_json,
};
pub use label_formatter::{
    ValueFormatterFn, compact_formatter, currency_formatter, default_value_formatter,
    format_compact, format_currency, format_percentage, format_truncated,
};
pub use legend::{LegendEntry, LegendItemLayout, LegendLayout, layout_legend};
pub use line_chart::{LineChart, LineScene, build_line_scene, line_domain};
pub use pie_chart::{PieChart, PieScene, build_pie_scene};
pub use plot_layout::{CartesianGutters, PlotLayout, estimate_text_width};

pub use crate::extensions::ChartEvent;
