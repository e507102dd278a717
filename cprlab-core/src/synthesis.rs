//! Signal synthesis — turns the level set and a preliminary reversal signal
//! into the final trade signal.
//!
//! Rules run in a fixed order and the first one that fails decides the
//! outcome:
//!
//! 1. no reversal found but reported Bullish → invalid reversal
//! 2. reversal type disagrees with its position relative to the close
//! 3. (level ladder and target selection)
//! 4. nothing crossed
//! 5. no level left in the direction of travel
//! 6. risk larger than reward
//! 7. target closer than `min_target` of entry
//! 8. stop-loss closer than `min_stop_loss` of entry
//!
//! Rules 1 and 2 reject before any level work. Rules 4–8 downgrade the
//! working signal to Neutral but keep its entry, stop-loss and crossed levels.

use crate::config::Thresholds;
use crate::domain::{sort_by_price, Level, NeutralReason, Signal, SignalValue};
use crate::reversal::{PreliminarySignal, ReversalType};

/// Target candidates for a directional signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Targets {
    /// Ascending by price.
    pub levels: Vec<Level>,
    /// Nearest level above the close for Buy; the highest candidate below for Sell.
    pub price: Option<f64>,
}

/// Select target candidates from a price-sorted level ladder.
///
/// Buy takes every level above the last level strictly below the close.
/// Sell takes every level below the first level strictly above the close.
/// Returns `None` for Neutral.
pub fn select_targets(value: SignalValue, close: f64, sorted: &[Level]) -> Option<Targets> {
    match value {
        SignalValue::Buy => {
            let start = sorted
                .iter()
                .rposition(|level| level.price < close)
                .map_or(0, |i| i + 1);
            let levels = sorted[start..].to_vec();
            let price = levels.first().map(|level| level.price);
            Some(Targets { levels, price })
        }
        SignalValue::Sell => {
            let end = sorted
                .iter()
                .position(|level| level.price > close)
                .unwrap_or(sorted.len());
            let levels = sorted[..end].to_vec();
            let price = levels.last().map(|level| level.price);
            Some(Targets { levels, price })
        }
        SignalValue::Neutral => None,
    }
}

/// `"<price> (<kind>), ..."` for each crossed level.
pub fn crossed_levels_message(crossed: &[Level]) -> String {
    crossed
        .iter()
        .map(Level::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// True when `price` is at least `fraction` of `entry` away from it on its own side.
pub fn clears_min_distance(price: f64, entry: f64, fraction: f64) -> bool {
    if price < entry {
        price <= entry * (1.0 - fraction)
    } else {
        price >= entry * (1.0 + fraction)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SignalSynthesizer {
    thresholds: Thresholds,
}

impl SignalSynthesizer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn synthesize(&self, levels: &[Level], preliminary: &PreliminarySignal) -> Signal {
        let close = preliminary.close;

        if preliminary.reversal_price.is_none()
            && preliminary.reversal_type == ReversalType::Bullish
        {
            log::debug!("rejecting: no reversal found but reported bullish");
            return Signal::rejected(NeutralReason::InvalidReversal, None, None);
        }

        let expected = preliminary.expected_reversal_type();
        if preliminary.reversal_type != expected {
            log::warn!(
                "reversal type {} does not match expected {} (reversal {:?}, close {:.2})",
                preliminary.reversal_type,
                expected,
                preliminary.reversal_price,
                close
            );
            return Signal::rejected(
                NeutralReason::ReversalTypeMismatch,
                Some(close),
                preliminary.reversal_price,
            );
        }

        let mut signal = Signal {
            signal: preliminary.value,
            entry_price: Some(close),
            stop_loss_price: preliminary.reversal_price,
            target_price: 0.0,
            target_levels: Vec::new(),
            crossed_levels: preliminary.crossed_levels.clone(),
            message: String::new(),
            neutral_reason: None,
        };

        let mut ladder = levels.to_vec();
        sort_by_price(&mut ladder);
        log::trace!("level ladder: {}", crossed_levels_message(&ladder));

        if let Some(targets) = select_targets(preliminary.value, close, &ladder) {
            signal.target_levels = targets.levels;
            signal.target_price = targets.price.unwrap_or(0.0);
            signal.message = crossed_levels_message(&signal.crossed_levels);
        }

        let verdict = self.check(&signal);
        match verdict {
            Some(reason) => {
                log::debug!("{} signal downgraded: {}", signal.signal, reason.message());
                signal.force_neutral(reason)
            }
            None => {
                log::debug!(
                    "{} signal at {:.2}, target {:.2}, crossed {}",
                    signal.signal,
                    close,
                    signal.target_price,
                    signal.message
                );
                signal
            }
        }
    }

    /// First filter the working signal fails, if any.
    fn check(&self, signal: &Signal) -> Option<NeutralReason> {
        if signal.crossed_levels.is_empty() {
            return Some(NeutralReason::NoLevelCrossed);
        }
        if signal.target_levels.is_empty() {
            return Some(NeutralReason::NoMoreLevels);
        }

        let entry = signal.entry_price?;
        // No reversal means no bounded stop: risk is unbounded.
        let Some(stop) = signal.stop_loss_price else {
            return Some(NeutralReason::PoorRiskReward);
        };
        let target = signal.target_price;

        if (stop - entry).abs() > (target - entry).abs() {
            return Some(NeutralReason::PoorRiskReward);
        }
        if !clears_min_distance(target, entry, self.thresholds.min_target) {
            return Some(NeutralReason::TargetTooClose);
        }
        if !clears_min_distance(stop, entry, self.thresholds.min_stop_loss) {
            return Some(NeutralReason::StopLossTooClose);
        }
        None
    }
}
