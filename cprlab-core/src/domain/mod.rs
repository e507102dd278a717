//! Domain types for CPR Lab

pub mod candle;
pub mod level;
pub mod signal;

pub use candle::{Candle, CandleSource};
pub use level::{crossed_levels, sort_by_price, Level, LevelKind};
pub use signal::{NeutralReason, Signal, SignalValue};
