//! Reversal detector port.
//!
//! Detection (fractal/turning-point search against the level set) lives
//! outside this crate. The synthesizer only relies on the fields of
//! [`PreliminarySignal`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::{CandleSource, Level, SignalValue};

/// Shape of the turning point the move started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReversalType {
    Bullish,
    Bearish,
}

impl fmt::Display for ReversalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
        })
    }
}

/// Detector output: a directional guess plus the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreliminarySignal {
    pub value: SignalValue,
    pub close: f64,
    /// `None` when no reversal point was found.
    #[serde(default)]
    pub reversal_price: Option<f64>,
    pub reversal_type: ReversalType,
    /// Levels the move from the reversal to the close went through.
    #[serde(default)]
    pub crossed_levels: Vec<Level>,
}

impl PreliminarySignal {
    /// Reversal type implied by where the reversal sits relative to the close.
    /// A missing reversal sits below every price.
    pub fn expected_reversal_type(&self) -> ReversalType {
        match self.reversal_price {
            Some(price) if price >= self.close => ReversalType::Bullish,
            _ => ReversalType::Bearish,
        }
    }
}

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("malformed candle data: {0}")]
    MalformedCandles(String),

    #[error("reversal detection failed: {0}")]
    Failed(String),

    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Inspects the current session against the level set and decides whether the
/// close crossed and reversed at a level.
pub trait ReversalDetector: Send + Sync {
    fn name(&self) -> &str;

    fn detect(
        &self,
        candles: &dyn CandleSource,
        levels: &[Level],
        close: f64,
    ) -> Result<PreliminarySignal, DetectorError>;
}

/// Replays a preliminary signal recorded from an external detector run.
#[derive(Debug, Clone)]
pub struct RecordedDetector {
    recorded: PreliminarySignal,
}

impl RecordedDetector {
    pub fn new(recorded: PreliminarySignal) -> Self {
        Self { recorded }
    }

    pub fn from_json(json: &str) -> Result<Self, DetectorError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| DetectorError::Failed(format!("invalid recorded signal: {e}")))
    }
}

impl ReversalDetector for RecordedDetector {
    fn name(&self) -> &str {
        "recorded"
    }

    fn detect(
        &self,
        candles: &dyn CandleSource,
        _levels: &[Level],
        close: f64,
    ) -> Result<PreliminarySignal, DetectorError> {
        if candles.is_empty() {
            return Err(DetectorError::MalformedCandles(
                "current session is empty".into(),
            ));
        }
        if self.recorded.close != close {
            log::warn!(
                "recorded close {:.2} differs from session close {:.2}",
                self.recorded.close,
                close
            );
        }
        Ok(self.recorded.clone())
    }
}
