//! Engine configuration, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::search::tt::DEFAULT_CAPACITY;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Share of the per-move timeout the search may use (0.90..=0.99).
    pub safety_fraction: f64,
    pub use_tt: bool,
    /// Transposition table size in entries.
    pub tt_capacity: usize,
    /// Iterative deepening instead of a single fixed-depth pass.
    pub iterative: bool,
    /// Overrides the depth derived from the board dimensions. 0 means exhaustive.
    pub depth: Option<u32>,
    /// Nodes between deadline checks.
    pub check_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            safety_fraction: 0.90,
            use_tt: true,
            tt_capacity: DEFAULT_CAPACITY,
            iterative: false,
            depth: None,
            check_interval: 256,
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.90..=0.99).contains(&self.safety_fraction) {
            return Err(ConfigError::Invalid(format!("safety_fraction {} outside [0.90, 0.99]", self.safety_fraction)));
        }
        if self.check_interval == 0 {
            return Err(ConfigError::Invalid("check_interval must be at least 1".into()));
        }
        if self.tt_capacity < 4 {
            return Err(ConfigError::Invalid(format!("tt_capacity {} below one bucket", self.tt_capacity)));
        }
        Ok(())
    }
}

/// Per-move timeout from a seconds value given on the command line.
pub fn timeout_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    if secs.is_nan() || secs < 0.0 {
        return Err(ConfigError::Invalid(format!("timeout {secs} is not a non-negative number of seconds")));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::Invalid(format!("timeout {secs}: {e}")))
}
