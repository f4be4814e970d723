//! Host-facing extension points.
//!
//! Plugins observe chart events; they never reach into geometry or
//! selection internals.

pub mod plugins;

pub use plugins::{ChartEvent, ChartPlugin, EventCallback, PluginContext};
