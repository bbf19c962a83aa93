//! Trade — a completed round trip with its itemized cost breakdown.

use crate::charges::ChargeBreakdown;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    /// Position was still open at the last candle and force-closed at its close.
    EndOfData,
}

/// A closed round-trip trade: entry at a signal candle's close → exit.
///
/// Immutable once emitted. `entry_time < exit_time` always holds, and
/// `net_pnl == gross_pnl - charges.total()` holds exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    // ── Entry ──
    pub entry_index: usize,
    pub entry_time: DateTime<FixedOffset>,
    pub entry_price: Decimal,

    // ── Exit ──
    pub exit_index: usize,
    pub exit_time: DateTime<FixedOffset>,
    pub exit_price: Decimal,
    pub exit_reason: ExitReason,

    // ── Size & PnL ──
    pub quantity: u32,
    pub gross_pnl: Decimal,
    pub charges: ChargeBreakdown,
    pub net_pnl: Decimal,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.net_pnl > Decimal::ZERO
    }

    /// Candles held between entry and exit.
    pub fn candles_held(&self) -> usize {
        self.exit_index.saturating_sub(self.entry_index)
    }
}
