//! Configuration schema types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::SimulationSettings;
use crate::plan::CHAIN_TIME;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdertrackConfig {
    /// Milliseconds per nominal duration unit of simulated operations.
    pub time_unit_ms: u64,

    /// Random extra delay of simulated operations, as a fraction.
    pub jitter: f64,

    /// Nominal duration of the on-chain submission.
    pub chain_time: u32,

    /// Default output verbosity.
    pub output: OutputMode,

    /// Where order and item records come from.
    #[serde(skip_serializing_if = "RecordsConfig::is_empty")]
    pub records: RecordsConfig,

    /// Account that receives payments (display only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,

    /// Number of runs kept in history.
    pub history_retention: usize,
}

impl Default for OrdertrackConfig {
    fn default() -> Self {
        Self {
            time_unit_ms: 100,
            jitter: 0.1,
            chain_time: CHAIN_TIME,
            output: OutputMode::default(),
            records: RecordsConfig::default(),
            payee: None,
            history_retention: 50,
        }
    }
}

impl OrdertrackConfig {
    /// Timing for simulated operations.
    pub fn simulation(&self) -> SimulationSettings {
        SimulationSettings {
            time_unit: Duration::from_millis(self.time_unit_ms),
            jitter: self.jitter,
            chain_time: self.chain_time,
        }
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
}

/// Record source settings. At most one of `catalog` and `endpoint`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// YAML or JSON catalog file, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Base URL of a REST endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout for the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl RecordsConfig {
    pub fn is_empty(&self) -> bool {
        self.catalog.is_none() && self.endpoint.is_none()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(10))
    }
}
