//! Open position state, owned by the simulator while it is `InPosition`.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

/// A single open long position. At most one exists at any simulated step.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Index of the entry candle in the series being simulated.
    pub entry_index: usize,
    pub entry_time: DateTime<FixedOffset>,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub quantity: u32,
}

impl Position {
    /// Distance from entry to stop, per unit.
    pub fn risk_per_unit(&self) -> Decimal {
        self.entry_price - self.stop_loss
    }

    pub fn unrealized_pnl(&self, price: Decimal) -> Decimal {
        (price - self.entry_price) * Decimal::from(self.quantity)
    }
}
