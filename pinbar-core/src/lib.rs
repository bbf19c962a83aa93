//! PinBar Core — signal detection, trade simulation, and cost accounting for a
//! single price-action strategy (bullish pin bar after a red candle) on
//! 5-minute index candles.
//!
//! The pipeline is strictly forward and replayable:
//! candle series → pattern classifier + time filter → trade simulator →
//! charge model → performance report. No component depends on a later one, and
//! a run owns all of its state, so parameter sweeps can run as independent
//! instances.
//!
//! All money arithmetic uses `rust_decimal::Decimal` so that
//! `net_pnl == gross_pnl - charges.total()` holds bit-exactly across long
//! trade logs.

pub mod charges;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod report;
pub mod strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types that cross the core boundary are
    /// Send + Sync, so callers can run parameter sweeps on worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Candle>();
        require_sync::<domain::Candle>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<charges::ChargeBreakdown>();
        require_sync::<charges::ChargeBreakdown>();
        require_send::<engine::TradeSimulator>();
        require_sync::<engine::TradeSimulator>();
        require_send::<engine::BacktestResult>();
        require_sync::<engine::BacktestResult>();
        require_send::<report::PerformanceSummary>();
        require_sync::<report::PerformanceSummary>();
        require_send::<config::StrategyConfig>();
        require_sync::<config::StrategyConfig>();
    }
}
