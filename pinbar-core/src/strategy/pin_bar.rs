//! Bullish pin bar classifier.
//!
//! A pin bar is a candle with a long lower wick, a small upper wick, and a
//! close near the high — price probed lower and was rejected. The strategy
//! additionally requires the previous candle to be bearish, so the pattern
//! reads as a reversal after selling pressure.

use crate::domain::Candle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Geometry thresholds for the pattern. Explicit config, never global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinBarConfig {
    /// Upper wick must be strictly below this fraction of the range.
    pub upper_wick_max_ratio: Decimal,
    /// Lower wick must be strictly above this fraction of the range.
    pub lower_wick_min_ratio: Decimal,
    /// `(close - low) / range` must be at least this (inclusive).
    pub close_position_min_ratio: Decimal,
}

impl Default for PinBarConfig {
    fn default() -> Self {
        Self {
            upper_wick_max_ratio: Decimal::new(15, 2),
            lower_wick_min_ratio: Decimal::new(50, 2),
            close_position_min_ratio: Decimal::new(60, 2),
        }
    }
}

/// Classifier output: match verdict plus the candle geometry that produced it.
///
/// The ratios are diagnostic — they are reported even when the pattern does
/// not match, except for zero-range candles where every ratio is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Index of the classified candle within its series.
    pub candle_index: usize,
    pub matched: bool,
    /// `(high - close) / range`.
    pub upper_wick_ratio: Decimal,
    /// `(open - low) / range`.
    pub lower_wick_ratio: Decimal,
    /// `|close - open| / range`.
    pub body_ratio: Decimal,
    /// `(close - low) / range`.
    pub close_position_ratio: Decimal,
}

impl Signal {
    fn no_match(candle_index: usize) -> Self {
        Self {
            candle_index,
            matched: false,
            upper_wick_ratio: Decimal::ZERO,
            lower_wick_ratio: Decimal::ZERO,
            body_ratio: Decimal::ZERO,
            close_position_ratio: Decimal::ZERO,
        }
    }
}

/// Classify `curr` (at `index` in its series) as a bullish pin bar, with
/// `prev` as directional context.
///
/// All conditions must hold:
/// - `prev` is bearish, `curr` is bullish
/// - upper wick ratio strictly below `upper_wick_max_ratio`
/// - lower wick ratio strictly above `lower_wick_min_ratio`
/// - lower wick longer than the body
/// - close position ratio at or above `close_position_min_ratio`
///
/// A zero-range candle never matches and never divides.
pub fn classify(prev: &Candle, curr: &Candle, index: usize, config: &PinBarConfig) -> Signal {
    let range = curr.range();
    if range <= Decimal::ZERO {
        return Signal::no_match(index);
    }

    let body = curr.close - curr.open;
    let upper_wick = curr.high - curr.close;
    let lower_wick = curr.open - curr.low;

    let upper_wick_ratio = upper_wick / range;
    let lower_wick_ratio = lower_wick / range;
    let body_ratio = body.abs() / range;
    let close_position_ratio = (curr.close - curr.low) / range;

    let matched = prev.is_bearish()
        && curr.is_bullish()
        && upper_wick_ratio < config.upper_wick_max_ratio
        && lower_wick_ratio > config.lower_wick_min_ratio
        && lower_wick > body
        && close_position_ratio >= config.close_position_min_ratio;

    Signal {
        candle_index: index,
        matched,
        upper_wick_ratio,
        lower_wick_ratio,
        body_ratio,
        close_position_ratio,
    }
}
