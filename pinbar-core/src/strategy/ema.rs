//! Exponential moving average, used as an optional trend gate on entries.
//!
//! Matches the recursive (`adjust = false`) definition:
//! `ema_0 = close_0`, `ema_t = alpha * close_t + (1 - alpha) * ema_{t-1}`
//! with `alpha = 2 / (period + 1)`.

use crate::domain::Candle;
use rust_decimal::Decimal;

/// Incremental EMA accumulator, seeded with the first value it sees.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: Decimal,
    value: Option<Decimal>,
}

impl Ema {
    pub fn new(period: u32) -> Self {
        Self {
            alpha: Decimal::from(2) / Decimal::from(period + 1),
            value: None,
        }
    }

    /// Feed one close, returning the updated EMA.
    pub fn update(&mut self, close: Decimal) -> Decimal {
        let next = match self.value {
            None => close,
            Some(prev) => self.alpha * close + (Decimal::ONE - self.alpha) * prev,
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }
}

/// Precompute the EMA of closes over a candle slice.
pub fn ema_series(candles: &[Candle], period: u32) -> Vec<Decimal> {
    let mut ema = Ema::new(period);
    candles.iter().map(|c| ema.update(c.close)).collect()
}
