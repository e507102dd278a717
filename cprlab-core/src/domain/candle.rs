//! Candle — the OHLC unit read by the level calculator and the reversal detector.

use serde::{Deserialize, Serialize};

/// OHLC candle for one interval of a session (a whole day, or a 5-minute bar).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Returns true if any OHLC field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low, high >= open/close, low <= open/close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// Indexed, read-only access to an ordered candle series.
///
/// Both the prior session and the current intraday session are read through
/// this contract, so callers can keep candles in whatever container they own.
pub trait CandleSource {
    /// Candle at `index`. Panics if `index >= len()`.
    fn candle(&self, index: usize) -> Candle;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close of the last candle, if any.
    fn last_close(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.candle(self.len() - 1).close)
        }
    }
}

impl CandleSource for [Candle] {
    fn candle(&self, index: usize) -> Candle {
        self[index]
    }

    fn len(&self) -> usize {
        <[Candle]>::len(self)
    }
}

impl CandleSource for Vec<Candle> {
    fn candle(&self, index: usize) -> Candle {
        self[index]
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}
