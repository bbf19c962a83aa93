//! Charge model — itemized transaction costs for NSE index futures round trips.
//!
//! Pure function: (entry price, exit price, quantity) → breakdown. All rates
//! live in an explicit [`ChargeConfig`] rather than process-wide constants, and
//! all arithmetic is `Decimal` so the per-trade identity
//! `net = gross - total charges` never drifts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statutory and broker rates for an intraday futures round trip.
///
/// Defaults reflect a flat-fee discount broker on NSE:
/// - brokerage: ₹20 per order, charged on both legs
/// - STT: 0.0125% of sell-side turnover
/// - exchange transaction charge: 0.002% of turnover, both legs
/// - GST: 18% of (brokerage + exchange transaction charge)
/// - SEBI turnover fee: 0.0001% of turnover, both legs
/// - stamp duty: 0.003% of buy-side turnover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    pub brokerage_per_order: Decimal,
    pub stt_rate: Decimal,
    pub exchange_txn_rate: Decimal,
    pub gst_rate: Decimal,
    pub sebi_rate: Decimal,
    pub stamp_duty_rate: Decimal,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            brokerage_per_order: Decimal::new(20, 0),
            stt_rate: Decimal::new(125, 6),       // 0.0125%
            exchange_txn_rate: Decimal::new(2, 5), // 0.002%
            gst_rate: Decimal::new(18, 2),         // 18%
            sebi_rate: Decimal::new(1, 6),         // 0.0001%
            stamp_duty_rate: Decimal::new(3, 5),   // 0.003%
        }
    }
}

impl ChargeConfig {
    /// Itemize the charges for one complete long round trip.
    ///
    /// The buy leg turnover is `entry_price * quantity`, the sell leg turnover
    /// `exit_price * quantity`. Leg attribution follows the field docs on
    /// [`ChargeBreakdown`].
    pub fn estimate(&self, entry_price: Decimal, exit_price: Decimal, quantity: u32) -> ChargeBreakdown {
        let qty = Decimal::from(quantity);
        let buy_turnover = entry_price * qty;
        let sell_turnover = exit_price * qty;
        let turnover = buy_turnover + sell_turnover;

        let brokerage = self.brokerage_per_order * Decimal::from(2u8);
        let exchange_txn = turnover * self.exchange_txn_rate;

        ChargeBreakdown {
            brokerage,
            stt: sell_turnover * self.stt_rate,
            exchange_txn,
            gst: (brokerage + exchange_txn) * self.gst_rate,
            sebi: turnover * self.sebi_rate,
            stamp_duty: buy_turnover * self.stamp_duty_rate,
        }
    }
}

/// Itemized cost breakdown for one round trip. All components non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    /// Flat fee, both legs (2 orders).
    pub brokerage: Decimal,
    /// Securities transaction tax, sell leg only.
    pub stt: Decimal,
    /// Exchange transaction charge, both legs.
    pub exchange_txn: Decimal,
    /// Goods and services tax on brokerage + exchange charge.
    pub gst: Decimal,
    /// Regulator (SEBI) turnover fee, both legs.
    pub sebi: Decimal,
    /// Stamp duty, buy leg only.
    pub stamp_duty: Decimal,
}

impl ChargeBreakdown {
    pub fn total(&self) -> Decimal {
        self.brokerage + self.stt + self.exchange_txn + self.gst + self.sebi + self.stamp_duty
    }
}
