//! Serializable signal configuration.
//!
//! Percentages are given the way traders quote them (`0.05` means 0.05%) and
//! are converted to fractions of the entry price by [`SignalConfig::thresholds`].
//! Thresholds are plain values handed to each call, so concurrent evaluations
//! with different settings never share state.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::levels::DEFAULT_INITIAL_BALANCE_CANDLES;

/// Ratio of the reserved maximum stop-loss distance to the minimum target distance.
pub const MAX_STOP_LOSS_TARGET_RATIO: f64 = 1.2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be a finite, non-negative percentage (got {value})")]
    InvalidPercent { field: &'static str, value: f64 },

    #[error("initial_balance_candles must be at least 1")]
    EmptyInitialBalance,
}

/// Caller-facing configuration for one signal evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Minimum distance from entry to target, in percent of entry.
    pub min_points_percent: f64,

    /// Minimum distance from entry to stop-loss, in percent of entry.
    pub min_points_stop_loss_percent: f64,

    /// Number of opening candles forming the initial balance.
    #[serde(default = "default_initial_balance_candles")]
    pub initial_balance_candles: usize,
}

fn default_initial_balance_candles() -> usize {
    DEFAULT_INITIAL_BALANCE_CANDLES
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            min_points_percent: 0.05,
            min_points_stop_loss_percent: 0.05,
            initial_balance_candles: DEFAULT_INITIAL_BALANCE_CANDLES,
        }
    }
}

impl SignalConfig {
    pub fn new(min_points_stop_loss_percent: f64, min_points_percent: f64) -> Self {
        Self {
            min_points_percent,
            min_points_stop_loss_percent,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("min_points_percent", self.min_points_percent),
            ("min_points_stop_loss_percent", self.min_points_stop_loss_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPercent { field, value });
            }
        }
        if self.initial_balance_candles == 0 {
            return Err(ConfigError::EmptyInitialBalance);
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        let min_target = self.min_points_percent / 100.0;
        Thresholds {
            min_target,
            min_stop_loss: self.min_points_stop_loss_percent / 100.0,
            max_stop_loss: min_target * MAX_STOP_LOSS_TARGET_RATIO,
        }
    }
}

/// Distance thresholds as fractions of the entry price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub min_target: f64,
    pub min_stop_loss: f64,
    /// Not enforced by any synthesis rule yet.
    pub max_stop_loss: f64,
}
