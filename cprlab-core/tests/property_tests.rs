//! Property tests for level and synthesis invariants.
//!
//! Uses proptest to verify:
//! 1. Central range ordering — bottom pivot never sits above top pivot
//! 2. Level count — 15 with a complete initial balance, 13 without
//! 3. Target ranges — Buy targets are a price-sorted suffix of the ladder
//!    starting at the close, Sell targets a prefix ending at the close
//! 4. Forced Neutral — downgraded signals keep entry, stop and crossed levels
//! 5. Purity — identical inputs give identical signals

use cprlab_core::domain::sort_by_price;
use cprlab_core::levels::{calculate_levels, PivotPoints, SessionExtremes};
use cprlab_core::synthesis::{select_targets, SignalSynthesizer};
use cprlab_core::{
    compute_signal, Candle, Level, LevelKind, NeutralReason, PreliminarySignal, RecordedDetector,
    ReversalType, SignalConfig, SignalValue,
};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

/// (high, low, close) with low <= close <= high.
fn arb_session() -> impl Strategy<Value = SessionExtremes> {
    (arb_price(), 0.0..50.0_f64, 0.0..=1.0_f64).prop_map(|(low, range, at)| SessionExtremes {
        high: low + range,
        low,
        close: low + range * at,
    })
}

fn arb_kind() -> impl Strategy<Value = LevelKind> {
    prop_oneof![
        Just(LevelKind::CentralPivot),
        Just(LevelKind::TopPivot),
        Just(LevelKind::BottomPivot),
        Just(LevelKind::Resistance),
        Just(LevelKind::Support),
        Just(LevelKind::InitialBalanceHigh),
        Just(LevelKind::InitialBalanceLow),
        Just(LevelKind::PreviousDayHigh),
        Just(LevelKind::PreviousDayLow),
    ]
}

fn arb_levels() -> impl Strategy<Value = Vec<Level>> {
    prop::collection::vec(
        (arb_price(), arb_kind()).prop_map(|(price, kind)| Level::new(price, kind)),
        1..20,
    )
}

fn arb_direction() -> impl Strategy<Value = SignalValue> {
    prop_oneof![
        Just(SignalValue::Buy),
        Just(SignalValue::Sell),
        Just(SignalValue::Neutral),
    ]
}

/// Preliminary signal whose reversal type agrees with its reversal position.
fn consistent_preliminary(
    value: SignalValue,
    close: f64,
    reversal: f64,
    crossed: Vec<Level>,
) -> PreliminarySignal {
    let reversal_type = if reversal < close {
        ReversalType::Bearish
    } else {
        ReversalType::Bullish
    };
    PreliminarySignal {
        value,
        close,
        reversal_price: Some(reversal),
        reversal_type,
        crossed_levels: crossed,
    }
}

fn candles_around(session: &SessionExtremes, n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n.max(1) as f64;
            let close = session.low + (session.high - session.low) * t;
            Candle::new(close, session.high, session.low, close)
        })
        .collect()
}

// ── 1. Central range ordering ────────────────────────────────────────

proptest! {
    #[test]
    fn bottom_pivot_never_above_top(session in arb_session()) {
        let pp = PivotPoints::from_extremes(&session);
        prop_assert!(pp.bottom_pivot <= pp.top_pivot);
    }

    /// Resistance tiers rise and support tiers fall from the first tier out.
    #[test]
    fn tiers_fan_out(session in arb_session()) {
        let pp = PivotPoints::from_extremes(&session);
        let eps = 1e-9;
        prop_assert!(pp.resistance[1] + eps >= pp.resistance[0]);
        prop_assert!(pp.resistance[2] + eps >= pp.resistance[1]);
        prop_assert!(pp.support[1] <= pp.support[0] + eps);
        prop_assert!(pp.support[2] <= pp.support[1] + eps);
    }
}

// ── 2. Level count ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn level_count_depends_on_initial_balance(
        session in arb_session(),
        current_len in 1usize..30,
    ) {
        let previous = vec![Candle::new(session.close, session.high, session.low, session.close)];
        let current = candles_around(&session, current_len);
        let levels = calculate_levels(&previous, &current, 12).unwrap();
        let expected = if current_len >= 12 { 15 } else { 13 };
        prop_assert_eq!(levels.len(), expected);
    }
}

// ── 3. Target ranges ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn buy_targets_are_suffix_from_close(levels in arb_levels(), close in arb_price()) {
        let mut sorted = levels;
        sort_by_price(&mut sorted);
        let targets = select_targets(SignalValue::Buy, close, &sorted).unwrap();

        prop_assert!(targets.levels.iter().all(|l| l.price >= close));
        prop_assert_eq!(&sorted[sorted.len() - targets.levels.len()..], &targets.levels[..]);
        if let Some(price) = targets.price {
            let min = targets.levels.iter().map(|l| l.price).fold(f64::INFINITY, f64::min);
            prop_assert_eq!(price, min);
            prop_assert_eq!(price, targets.levels[0].price);
        } else {
            prop_assert!(targets.levels.is_empty());
        }
    }

    #[test]
    fn sell_targets_are_prefix_to_close(levels in arb_levels(), close in arb_price()) {
        let mut sorted = levels;
        sort_by_price(&mut sorted);
        let targets = select_targets(SignalValue::Sell, close, &sorted).unwrap();

        prop_assert!(targets.levels.iter().all(|l| l.price <= close));
        prop_assert_eq!(&sorted[..targets.levels.len()], &targets.levels[..]);
        if let Some(price) = targets.price {
            let max = targets.levels.iter().map(|l| l.price).fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(price, max);
        } else {
            prop_assert!(targets.levels.is_empty());
        }
    }

    /// A directional result always targets the first candidate in its direction.
    #[test]
    fn directional_signal_target_is_in_range(
        levels in arb_levels(),
        value in arb_direction(),
        close in arb_price(),
        offset in 0.01..20.0_f64,
    ) {
        let reversal = match value {
            SignalValue::Sell => close + offset,
            _ => close - offset,
        };
        let crossed = vec![levels[0]];
        let pre = consistent_preliminary(value, close, reversal, crossed);
        let signal = SignalSynthesizer::new(SignalConfig::new(0.0, 0.0).thresholds())
            .synthesize(&levels, &pre);

        match signal.signal {
            SignalValue::Buy => {
                prop_assert_eq!(signal.target_price, signal.target_levels[0].price);
                prop_assert!(signal.target_levels.windows(2).all(|w| w[0].price <= w[1].price));
            }
            SignalValue::Sell => {
                let last = signal.target_levels[signal.target_levels.len() - 1];
                prop_assert_eq!(signal.target_price, last.price);
                prop_assert!(signal.target_levels.windows(2).all(|w| w[0].price <= w[1].price));
            }
            SignalValue::Neutral => {
                prop_assert_eq!(signal.target_price, 0.0);
                prop_assert!(signal.target_levels.is_empty());
            }
        }
    }
}

// ── 4. Forced Neutral ────────────────────────────────────────────────

proptest! {
    #[test]
    fn forced_neutral_keeps_entry_stop_and_crossed(
        levels in arb_levels(),
        value in arb_direction(),
        close in arb_price(),
        reversal in arb_price(),
        min_target in 0.0..10.0_f64,
        min_stop in 0.0..10.0_f64,
        cross_first in any::<bool>(),
    ) {
        let crossed = if cross_first { vec![levels[0]] } else { Vec::new() };
        let pre = consistent_preliminary(value, close, reversal, crossed.clone());
        let signal = SignalSynthesizer::new(SignalConfig::new(min_stop, min_target).thresholds())
            .synthesize(&levels, &pre);

        // A consistent reversal is never rejected before level selection.
        prop_assert!(!matches!(
            signal.neutral_reason,
            Some(NeutralReason::InvalidReversal) | Some(NeutralReason::ReversalTypeMismatch)
        ));
        prop_assert_eq!(signal.entry_price, Some(close));
        prop_assert_eq!(signal.stop_loss_price, Some(reversal));
        prop_assert_eq!(&signal.crossed_levels, &crossed);
        if signal.signal == SignalValue::Neutral {
            prop_assert!(signal.neutral_reason.is_some());
            prop_assert_eq!(signal.message.as_str(), signal.neutral_reason.unwrap().message());
            prop_assert_eq!(signal.target_price, 0.0);
            prop_assert!(signal.target_levels.is_empty());
        } else {
            prop_assert!(signal.neutral_reason.is_none());
            let risk = (reversal - close).abs();
            let reward = (signal.target_price - close).abs();
            prop_assert!(risk <= reward);
        }
        if !cross_first {
            prop_assert_eq!(signal.neutral_reason, Some(NeutralReason::NoLevelCrossed));
        }
    }
}

// ── 5. Purity ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn identical_inputs_identical_signals(
        session in arb_session(),
        value in arb_direction(),
        offset in -5.0..5.0_f64,
    ) {
        let previous = vec![Candle::new(session.close, session.high, session.low, session.close)];
        let current = candles_around(&session, 14);
        let close = current[current.len() - 1].close;
        let levels = calculate_levels(&previous, &current, 12).unwrap();
        let pre = consistent_preliminary(value, close, close + offset, vec![levels[0]]);
        let detector = RecordedDetector::new(pre);

        let first = compute_signal(0.05, 0.1, &detector, &previous, &current).unwrap();
        let second = compute_signal(0.05, 0.1, &detector, &previous, &current).unwrap();
        prop_assert_eq!(first, second);
    }
}
