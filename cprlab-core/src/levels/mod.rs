//! Level calculation — derives the CPR level set from the previous session and
//! the opening window of the current session.
//!
//! Output order is calculation order (pivots, initial balance, previous-day
//! extremes); consumers sort by price themselves.

pub mod pivots;

pub use pivots::PivotPoints;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::{CandleSource, Level, LevelKind};

/// Opening window of 5-minute candles that forms the initial balance (one hour).
pub const DEFAULT_INITIAL_BALANCE_CANDLES: usize = 12;

/// Which input series a problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    Previous,
    Current,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Previous => "previous",
            Self::Current => "current",
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("{0} session has no candles")]
    EmptySession(Session),
}

/// High, low and close of a whole candle series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionExtremes {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl SessionExtremes {
    /// `None` for an empty series.
    pub fn of<C: CandleSource + ?Sized>(candles: &C) -> Option<Self> {
        let len = candles.len();
        if len == 0 {
            return None;
        }
        let first = candles.candle(0);
        let (high, low) = (1..len).fold((first.high, first.low), |(high, low), i| {
            let candle = candles.candle(i);
            (high.max(candle.high), low.min(candle.low))
        });
        Some(Self {
            high,
            low,
            close: candles.candle(len - 1).close,
        })
    }
}

/// Initial-balance high/low over the first `window` candles, or nothing if the
/// session has not run that long yet (or `window` is zero).
pub fn initial_balance_levels<C: CandleSource + ?Sized>(candles: &C, window: usize) -> Vec<Level> {
    if window == 0 || candles.len() < window {
        return Vec::new();
    }
    let first = candles.candle(0);
    let (high, low) = (1..window).fold((first.high, first.low), |(high, low), i| {
        let candle = candles.candle(i);
        (high.max(candle.high), low.min(candle.low))
    });
    vec![
        Level::new(high, LevelKind::InitialBalanceHigh),
        Level::new(low, LevelKind::InitialBalanceLow),
    ]
}

pub fn previous_day_levels(previous: &SessionExtremes) -> [Level; 2] {
    [
        Level::new(previous.high, LevelKind::PreviousDayHigh),
        Level::new(previous.low, LevelKind::PreviousDayLow),
    ]
}

/// Full level set: 11 pivot levels, 2 initial-balance levels when the opening
/// window is complete, and the previous day's high and low.
pub fn calculate_levels<P, C>(
    previous: &P,
    current: &C,
    initial_balance_candles: usize,
) -> Result<Vec<Level>, LevelError>
where
    P: CandleSource + ?Sized,
    C: CandleSource + ?Sized,
{
    let extremes =
        SessionExtremes::of(previous).ok_or(LevelError::EmptySession(Session::Previous))?;
    if current.is_empty() {
        return Err(LevelError::EmptySession(Session::Current));
    }

    let mut levels = PivotPoints::from_extremes(&extremes).levels();
    levels.extend(initial_balance_levels(current, initial_balance_candles));
    levels.extend(previous_day_levels(&extremes));

    log::debug!(
        "calculated {} levels (prev H={:.2} L={:.2} C={:.2}, {} current candles)",
        levels.len(),
        extremes.high,
        extremes.low,
        extremes.close,
        current.len()
    );
    Ok(levels)
}
