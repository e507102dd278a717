//! Signal API — levels, then reversal detection, then synthesis.

use thiserror::Error;

use crate::config::{ConfigError, SignalConfig};
use crate::domain::{CandleSource, Signal};
use crate::levels::{calculate_levels, LevelError, Session};
use crate::reversal::{DetectorError, ReversalDetector};
use crate::synthesis::SignalSynthesizer;

/// Failures of a signal computation. "No trade" outcomes are Neutral signals,
/// never errors.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error(transparent)]
    Levels(#[from] LevelError),

    #[error("reversal detector '{detector}' failed: {source}")]
    Detector {
        detector: String,
        source: DetectorError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A configured detector plus thresholds.
///
/// Holds no per-call state; one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct SignalEngine<D> {
    config: SignalConfig,
    detector: D,
}

impl<D: ReversalDetector> SignalEngine<D> {
    pub fn new(config: SignalConfig, detector: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, detector })
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn compute<P, C>(&self, previous: &P, current: &C) -> Result<Signal, SignalError>
    where
        P: CandleSource + ?Sized,
        C: CandleSource,
    {
        evaluate(&self.config, &self.detector, previous, current)
    }
}

/// One-shot signal computation with percentages as quoted by the caller
/// (`0.05` = 0.05%).
pub fn compute_signal<D, P, C>(
    min_points_stop_loss_percent: f64,
    min_points_percent: f64,
    detector: &D,
    previous: &P,
    current: &C,
) -> Result<Signal, SignalError>
where
    D: ReversalDetector + ?Sized,
    P: CandleSource + ?Sized,
    C: CandleSource,
{
    let config = SignalConfig::new(min_points_stop_loss_percent, min_points_percent);
    config.validate()?;
    evaluate(&config, detector, previous, current)
}

fn evaluate<D, P, C>(
    config: &SignalConfig,
    detector: &D,
    previous: &P,
    current: &C,
) -> Result<Signal, SignalError>
where
    D: ReversalDetector + ?Sized,
    P: CandleSource + ?Sized,
    C: CandleSource,
{
    let close = current
        .last_close()
        .ok_or(LevelError::EmptySession(Session::Current))?;
    let levels = calculate_levels(previous, current, config.initial_balance_candles)?;

    let preliminary =
        detector
            .detect(current, &levels, close)
            .map_err(|source| SignalError::Detector {
                detector: detector.name().to_string(),
                source,
            })?;
    log::debug!(
        "{} detector: {} at {:.2}, {} crossed",
        detector.name(),
        preliminary.value,
        preliminary.close,
        preliminary.crossed_levels.len()
    );

    Ok(SignalSynthesizer::new(config.thresholds()).synthesize(&levels, &preliminary))
}
