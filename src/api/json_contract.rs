//! Versioned JSON envelopes for chart configuration plus parsers for the data
//! payloads calling screens receive from their REST layer.
//!
//! Config parsing is compat-style: a bare config object is accepted as well
//! as a `{ "schema_version": 1, "config": ... }` envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{CategoricalBar, SegmentDatum, Series};
use crate::error::{ChartError, ChartResult};

use super::chart_config::{BarChartConfig, LineChartConfig, PieChartConfig};

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfigJsonContractV1<C> {
    pub schema_version: u32,
    pub config: C,
}

fn to_contract_v1_pretty<C: Serialize + Clone>(config: &C, what: &str) -> ChartResult<String> {
    let payload = ChartConfigJsonContractV1 {
        schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
        config: config.clone(),
    };
    serde_json::to_string_pretty(&payload).map_err(|e| {
        ChartError::Serialization(format!("failed to serialize {what} contract v1: {e}"))
    })
}

fn from_compat_str<C: DeserializeOwned>(input: &str, what: &str) -> ChartResult<C> {
    if let Ok(config) = serde_json::from_str::<C>(input) {
        return Ok(config);
    }
    let payload: ChartConfigJsonContractV1<C> = serde_json::from_str(input).map_err(|e| {
        ChartError::Serialization(format!("failed to parse {what} json payload: {e}"))
    })?;
    if payload.schema_version != CHART_CONFIG_JSON_SCHEMA_V1 {
        return Err(ChartError::Serialization(format!(
            "unsupported {what} schema version: {}",
            payload.schema_version
        )));
    }
    Ok(payload.config)
}

impl LineChartConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        to_contract_v1_pretty(self, "line chart config")
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let config: Self = from_compat_str(input, "line chart config")?;
        config.validate()?;
        Ok(config)
    }
}

impl BarChartConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        to_contract_v1_pretty(self, "bar chart config")
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let config: Self = from_compat_str(input, "bar chart config")?;
        config.validate()?;
        Ok(config)
    }
}

impl PieChartConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        to_contract_v1_pretty(self, "pie chart config")
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let config: Self = from_compat_str(input, "pie chart config")?;
        config.validate()?;
        Ok(config)
    }
}

/// Parses a JSON array of series (`id`, `name`, `data`, optional `color`,
/// `dashed`, `confidenceUpper`, `confidenceLower`).
pub fn parse_series_json(input: &str) -> ChartResult<Vec<Series>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::Serialization(format!("failed to parse series json: {e}")))
}

pub fn parse_bars_json(input: &str) -> ChartResult<Vec<CategoricalBar>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::Serialization(format!("failed to parse bars json: {e}")))
}

pub fn parse_segments_json(input: &str) -> ChartResult<Vec<SegmentDatum>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::Serialization(format!("failed to parse segments json: {e}")))
}
