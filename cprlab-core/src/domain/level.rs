//! Price levels shared between the level calculator, the reversal detector and
//! the synthesizer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a level was derived from.
///
/// Resistance and support come in four tiers each; the tier is implied by the
/// price ordering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKind {
    #[serde(rename = "CENTRAL PIVOT")]
    CentralPivot,
    #[serde(rename = "TOP PIVOT")]
    TopPivot,
    #[serde(rename = "BOTTOM PIVOT")]
    BottomPivot,
    #[serde(rename = "RESISTANCE")]
    Resistance,
    #[serde(rename = "SUPPORT")]
    Support,
    #[serde(rename = "INITIAL BALANCE HIGH")]
    InitialBalanceHigh,
    #[serde(rename = "INITIAL BALANCE LOW")]
    InitialBalanceLow,
    #[serde(rename = "PREVIOUS DAY HIGH")]
    PreviousDayHigh,
    #[serde(rename = "PREVIOUS DAY LOW")]
    PreviousDayLow,
}

impl LevelKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CentralPivot => "CENTRAL PIVOT",
            Self::TopPivot => "TOP PIVOT",
            Self::BottomPivot => "BOTTOM PIVOT",
            Self::Resistance => "RESISTANCE",
            Self::Support => "SUPPORT",
            Self::InitialBalanceHigh => "INITIAL BALANCE HIGH",
            Self::InitialBalanceLow => "INITIAL BALANCE LOW",
            Self::PreviousDayHigh => "PREVIOUS DAY HIGH",
            Self::PreviousDayLow => "PREVIOUS DAY LOW",
        }
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A computed price level. Plain data: the detector and the synthesizer agree
/// on it structurally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    pub kind: LevelKind,
}

impl Level {
    pub fn new(price: f64, kind: LevelKind) -> Self {
        Self { price, kind }
    }

    /// True when the level lies strictly between the reversal price and the
    /// close, in either direction of travel.
    pub fn has_crossed(&self, reversal_price: f64, close_price: f64) -> bool {
        (reversal_price > self.price && self.price > close_price)
            || (reversal_price < self.price && self.price < close_price)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ({})", self.price, self.kind)
    }
}

/// Levels crossed on the move from `reversal_price` to `close_price`, in input order.
pub fn crossed_levels(levels: &[Level], reversal_price: f64, close_price: f64) -> Vec<Level> {
    levels
        .iter()
        .filter(|level| level.has_crossed(reversal_price, close_price))
        .copied()
        .collect()
}

/// Stable ascending sort by price. Equal prices keep their calculation order.
pub fn sort_by_price(levels: &mut [Level]) {
    levels.sort_by(|a, b| a.price.total_cmp(&b.price));
}
