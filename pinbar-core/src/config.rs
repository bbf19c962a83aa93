//! Strategy configuration — one immutable value per run, loadable from TOML.
//!
//! Every tunable (pattern thresholds, windows, risk parameters, charge rates)
//! lives here and is passed into components at construction. Nothing reads
//! process-wide state.

use crate::charges::ChargeConfig;
use crate::engine::{ExitPriority, SimulatorConfig, TradeSimulator};
use crate::strategy::{PinBarConfig, TradingWindows, Window};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors, fatal at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("trading window {index}: end must be strictly after start")]
    WindowEndNotAfterStart { index: usize },

    #[error("trading window {index}: hour/minute out of range")]
    WindowOutOfRange { index: usize },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The full recognized configuration surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub stop_loss_buffer_points: Decimal,
    pub risk_reward_ratio: Decimal,
    pub lot_size: u32,
    pub units_per_lot: u32,
    pub use_time_filter: bool,
    pub trading_windows: Vec<Window>,
    pub use_ema_filter: bool,
    pub ema_period: u32,
    pub exit_priority: ExitPriority,
    pub pattern: PinBarConfig,
    pub charges: ChargeConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        let sim = SimulatorConfig::default();
        Self {
            stop_loss_buffer_points: sim.stop_loss_buffer_points,
            risk_reward_ratio: sim.risk_reward_ratio,
            lot_size: sim.lot_size,
            units_per_lot: sim.units_per_lot,
            use_time_filter: sim.use_time_filter,
            trading_windows: TradingWindows::default_strategy().windows().to_vec(),
            use_ema_filter: sim.use_ema_filter,
            ema_period: sim.ema_period,
            exit_priority: sim.exit_priority,
            pattern: PinBarConfig::default(),
            charges: ChargeConfig::default(),
        }
    }
}

impl StrategyConfig {
    /// Load from a TOML file. Missing keys take their defaults; the result is
    /// validated before being returned.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the components rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.risk_reward_ratio <= Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                field: "risk_reward_ratio",
            });
        }
        if self.stop_loss_buffer_points < Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                field: "stop_loss_buffer_points",
            });
        }
        if self.lot_size == 0 {
            return Err(ConfigError::NonPositive { field: "lot_size" });
        }
        if self.units_per_lot == 0 {
            return Err(ConfigError::NonPositive {
                field: "units_per_lot",
            });
        }
        if self.ema_period == 0 {
            return Err(ConfigError::NonPositive { field: "ema_period" });
        }
        if self.pattern.upper_wick_max_ratio <= Decimal::ZERO
            || self.pattern.lower_wick_min_ratio <= Decimal::ZERO
            || self.pattern.close_position_min_ratio <= Decimal::ZERO
        {
            return Err(ConfigError::NonPositive {
                field: "pattern thresholds",
            });
        }
        // Windows are validated by construction.
        TradingWindows::new(self.trading_windows.clone())?;
        Ok(())
    }

    /// Build the simulator this configuration describes.
    pub fn build_simulator(&self) -> Result<TradeSimulator, ConfigError> {
        self.validate()?;
        let windows = TradingWindows::new(self.trading_windows.clone())?;
        let sim_config = SimulatorConfig {
            stop_loss_buffer_points: self.stop_loss_buffer_points,
            risk_reward_ratio: self.risk_reward_ratio,
            lot_size: self.lot_size,
            units_per_lot: self.units_per_lot,
            use_time_filter: self.use_time_filter,
            use_ema_filter: self.use_ema_filter,
            ema_period: self.ema_period,
            exit_priority: self.exit_priority,
        };
        Ok(TradeSimulator::new(
            sim_config,
            self.pattern.clone(),
            windows,
            self.charges.clone(),
        ))
    }
}
