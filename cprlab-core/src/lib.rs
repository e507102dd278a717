//! CPR Lab Core — central pivot range levels and reversal-at-level signals.
//!
//! This crate turns a prior session and the current intraday session into one
//! trade signal:
//! - Domain types (candles, levels, signals) and the candle-source contract
//! - Level calculation (pivots, resistance/support tiers, initial balance,
//!   previous-day extremes)
//! - Reversal detector port (detection itself is external)
//! - Signal synthesis with ordering, target selection and risk filters
//! - Signal API wiring the three together with call-scoped thresholds

pub mod api;
pub mod config;
pub mod data;
pub mod domain;
pub mod levels;
pub mod reversal;
pub mod synthesis;

pub use api::{compute_signal, SignalEngine, SignalError};
pub use config::{SignalConfig, Thresholds};
pub use domain::{Candle, CandleSource, Level, LevelKind, NeutralReason, Signal, SignalValue};
pub use reversal::{DetectorError, PreliminarySignal, RecordedDetector, ReversalDetector, ReversalType};
