//! Signal — the final trade decision handed back to the strategy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::level::Level;

/// Direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalValue {
    Buy,
    Sell,
    Neutral,
}

impl SignalValue {
    pub fn is_directional(&self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Neutral => "NEUTRAL",
        })
    }
}

/// Why a signal ended up Neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeutralReason {
    InvalidReversal,
    ReversalTypeMismatch,
    NoLevelCrossed,
    NoMoreLevels,
    PoorRiskReward,
    TargetTooClose,
    StopLossTooClose,
}

impl NeutralReason {
    /// Rationale text carried in [`Signal::message`].
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidReversal => "Reversal invalid, both bull n bear fractal",
            Self::ReversalTypeMismatch => "Reversal type not matching trade",
            Self::NoLevelCrossed => "No level has crossed",
            Self::NoMoreLevels => "No more levels",
            Self::PoorRiskReward => "No good RR",
            Self::TargetTooClose => "Not enough points to Target",
            Self::StopLossTooClose => "Not enough points to Stop Loss",
        }
    }
}

/// Final trade signal.
///
/// Directional signals always carry a target: `target_price` is an element of
/// `target_levels`, which is a contiguous price-sorted slice of the level set.
/// Neutral signals have `target_price == 0.0` and no target levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal: SignalValue,
    /// Unset only when the reversal was invalid.
    pub entry_price: Option<f64>,
    /// Unset when the detector found no reversal.
    pub stop_loss_price: Option<f64>,
    pub target_price: f64,
    pub target_levels: Vec<Level>,
    pub crossed_levels: Vec<Level>,
    pub message: String,
    /// `None` for directional signals.
    pub neutral_reason: Option<NeutralReason>,
}

impl Signal {
    /// Neutral signal that never got as far as level selection.
    pub fn rejected(
        reason: NeutralReason,
        entry_price: Option<f64>,
        stop_loss_price: Option<f64>,
    ) -> Self {
        Self {
            signal: SignalValue::Neutral,
            entry_price,
            stop_loss_price,
            target_price: 0.0,
            target_levels: Vec::new(),
            crossed_levels: Vec::new(),
            message: reason.message().to_string(),
            neutral_reason: Some(reason),
        }
    }

    /// Downgrade to Neutral, keeping entry, stop-loss and crossed levels.
    pub fn force_neutral(mut self, reason: NeutralReason) -> Self {
        self.signal = SignalValue::Neutral;
        self.target_price = 0.0;
        self.target_levels.clear();
        self.message = reason.message().to_string();
        self.neutral_reason = Some(reason);
        self
    }

    pub fn is_neutral(&self) -> bool {
        self.signal == SignalValue::Neutral
    }
}
