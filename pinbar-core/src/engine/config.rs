//! Simulator configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tie-break when a single candle's range spans both exit levels.
///
/// OHLC data does not reveal the intrabar path, so the engine cannot know
/// which level was touched first. `StopLossFirst` assumes the worse outcome
/// and is the default; the policy is configurable because the ambiguity is
/// real, not an implementation detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPriority {
    #[default]
    StopLossFirst,
    TakeProfitFirst,
}

/// Parameters of the trade state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Points subtracted from the signal candle's low to place the stop.
    pub stop_loss_buffer_points: Decimal,
    /// Take-profit distance as a multiple of the stop distance.
    pub risk_reward_ratio: Decimal,
    pub lot_size: u32,
    pub units_per_lot: u32,
    pub use_time_filter: bool,
    /// Optional `close > EMA(period)` gate on entries.
    pub use_ema_filter: bool,
    pub ema_period: u32,
    pub exit_priority: ExitPriority,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            stop_loss_buffer_points: Decimal::from(5),
            risk_reward_ratio: Decimal::new(35, 1),
            lot_size: 1,
            units_per_lot: 25,
            use_time_filter: true,
            use_ema_filter: false,
            ema_period: 7,
            exit_priority: ExitPriority::default(),
        }
    }
}

impl SimulatorConfig {
    /// Units per trade: lots × units per lot.
    pub fn quantity(&self) -> u32 {
        self.lot_size * self.units_per_lot
    }
}
