//! Performance report — pure functions from the trade log to summary stats.
//!
//! Everything here is recomputable at any time from the persisted trade log;
//! no state is carried beyond the input slice.

use crate::domain::Trade;
use chrono::{Datelike, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-bucket statistics for the month and hour breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub trades: usize,
    pub wins: usize,
    pub net_pnl: Decimal,
}

/// Aggregate statistics for one backtest run.
///
/// `profit_factor` is `None` when gross loss is zero — the undefined/infinite
/// sentinel, never a division failure. A trade counts as a win when its net
/// P&L is strictly positive; everything else (including breakeven) is a loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Fraction of winning trades, 0 when the log is empty.
    pub win_rate: Decimal,
    /// Sum of positive gross P&L.
    pub gross_profit: Decimal,
    /// Sum of negative gross P&L, as a positive magnitude.
    pub gross_loss: Decimal,
    pub profit_factor: Option<Decimal>,
    pub total_charges: Decimal,
    pub net_pnl: Decimal,
    pub avg_net_pnl: Decimal,
    /// Largest single net win (zero if no winners).
    pub max_win: Decimal,
    /// Most negative single net P&L (zero if no losers).
    pub max_loss: Decimal,
    /// Keyed by entry month, `"YYYY-MM"`.
    pub by_month: BTreeMap<String, BucketStats>,
    /// Keyed by entry hour of day (exchange-local).
    pub by_hour: BTreeMap<u32, BucketStats>,
}

impl PerformanceSummary {
    /// Compute the full summary from an ordered trade log.
    pub fn compute(trades: &[Trade]) -> Self {
        let total_trades = trades.len();
        let wins = trades.iter().filter(|t| t.is_winner()).count();
        let losses = total_trades - wins;

        let gross_profit: Decimal = trades
            .iter()
            .filter(|t| t.gross_pnl > Decimal::ZERO)
            .map(|t| t.gross_pnl)
            .sum();
        let gross_loss: Decimal = trades
            .iter()
            .filter(|t| t.gross_pnl < Decimal::ZERO)
            .map(|t| -t.gross_pnl)
            .sum();

        let profit_factor = if gross_loss.is_zero() {
            None
        } else {
            Some(gross_profit / gross_loss)
        };

        let total_charges: Decimal = trades.iter().map(|t| t.charges.total()).sum();
        let net_pnl: Decimal = trades.iter().map(|t| t.net_pnl).sum();
        let avg_net_pnl = if total_trades == 0 {
            Decimal::ZERO
        } else {
            net_pnl / Decimal::from(total_trades)
        };
        let win_rate = if total_trades == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(wins) / Decimal::from(total_trades)
        };

        let max_win = trades
            .iter()
            .map(|t| t.net_pnl)
            .filter(|p| *p > Decimal::ZERO)
            .max()
            .unwrap_or(Decimal::ZERO);
        let max_loss = trades
            .iter()
            .map(|t| t.net_pnl)
            .filter(|p| *p < Decimal::ZERO)
            .min()
            .unwrap_or(Decimal::ZERO);

        let mut by_month: BTreeMap<String, BucketStats> = BTreeMap::new();
        let mut by_hour: BTreeMap<u32, BucketStats> = BTreeMap::new();
        for trade in trades {
            let month = format!(
                "{:04}-{:02}",
                trade.entry_time.year(),
                trade.entry_time.month()
            );
            let hour = trade.entry_time.hour();
            for stats in [
                by_month.entry(month).or_default(),
                by_hour.entry(hour).or_default(),
            ] {
                stats.trades += 1;
                if trade.is_winner() {
                    stats.wins += 1;
                }
                stats.net_pnl += trade.net_pnl;
            }
        }

        Self {
            total_trades,
            wins,
            losses,
            win_rate,
            gross_profit,
            gross_loss,
            profit_factor,
            total_charges,
            net_pnl,
            avg_net_pnl,
            max_win,
            max_loss,
            by_month,
            by_hour,
        }
    }
}
