//! Trade simulation engine — the sequential state machine that turns pattern
//! signals into closed trades.

pub mod config;
pub mod simulator;

pub use config::{ExitPriority, SimulatorConfig};
pub use simulator::{BacktestError, BacktestResult, TradeSimulator};
