//! Candle — the fundamental market data unit.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLC candle for a single instrument over a fixed interval.
///
/// Timestamps carry the exchange-local offset (IST for NSE data). Prices are
/// fixed-point decimals: everything downstream (P&L, charges) must stay exact,
/// so binary floats never enter the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<FixedOffset>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Candle {
    /// Full bar range, `high - low`. Zero for degenerate candles.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Basic OHLC sanity: positive prices, `low <= open, close <= high`.
    pub fn is_sane(&self) -> bool {
        self.low > Decimal::ZERO
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}
