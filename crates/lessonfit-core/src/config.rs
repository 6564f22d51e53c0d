//! Optimizer configuration

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default deviation (seconds) still handled as a minor adjustment
pub const DEFAULT_TOLERANCE_SECS: f64 = 20.0;

/// Main optimizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Default tolerance when a call does not pass its own
    pub tolerance_secs: f64,

    /// No phase is shortened below this many seconds by minor adjustment
    pub min_phase_duration_secs: f64,

    /// Phases shrinking below this ratio get their intensifiers trimmed
    pub shrink_ratio: f64,

    /// Phases growing above this ratio get pacing markers
    pub stretch_ratio: f64,

    /// Upper bound on any single generator call
    pub generation_timeout_ms: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            min_phase_duration_secs: 10.0,
            shrink_ratio: 0.8,
            stretch_ratio: 1.2,
            generation_timeout_ms: 120_000,
        }
    }
}

impl OptimizerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default tolerance
    pub fn with_tolerance(mut self, secs: f64) -> Self {
        self.tolerance_secs = secs;
        self
    }

    /// Set the per-phase duration floor
    pub fn with_min_phase_duration(mut self, secs: f64) -> Self {
        self.min_phase_duration_secs = secs;
        self
    }

    /// Set the generator timeout
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Generator timeout as a `Duration`
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance_secs.is_finite() && self.tolerance_secs >= 0.0) {
            return Err(EngineError::Config(format!(
                "tolerance_secs must be >= 0, got {}",
                self.tolerance_secs
            )));
        }
        if !(self.min_phase_duration_secs.is_finite() && self.min_phase_duration_secs >= 0.0) {
            return Err(EngineError::Config(format!(
                "min_phase_duration_secs must be >= 0, got {}",
                self.min_phase_duration_secs
            )));
        }
        if !(self.shrink_ratio > 0.0 && self.shrink_ratio < self.stretch_ratio) {
            return Err(EngineError::Config(format!(
                "shrink_ratio ({}) must be positive and below stretch_ratio ({})",
                self.shrink_ratio, self.stretch_ratio
            )));
        }
        if self.generation_timeout_ms == 0 {
            return Err(EngineError::Config(
                "generation_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
