//! The trade state machine: Flat ⇄ InPosition over a validated candle series.
//!
//! Candles are processed strictly in chronological order, one transition per
//! candle. An entry happens on the candle that completes the pattern; exits
//! are evaluated on every later candle, so a position can never open and close
//! on the same bar. A position still open after the last candle is force-closed
//! at that candle's close.

use crate::charges::ChargeConfig;
use crate::domain::{Candle, ExitReason, Position, Trade};
use crate::strategy::{classify, ema_series, PinBarConfig, TradingWindows};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use super::config::{ExitPriority, SimulatorConfig};

/// Fatal input-validation failures. Reported before any simulation step runs;
/// no partial results are produced.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("candle {index} at {timestamp} is not strictly after its predecessor")]
    NonChronological {
        index: usize,
        timestamp: DateTime<FixedOffset>,
    },
    #[error("candle {index} at {timestamp} is malformed (requires positive prices and low <= open, close <= high)")]
    MalformedCandle {
        index: usize,
        timestamp: DateTime<FixedOffset>,
    },
}

/// Output of one backtest run: the ordered trade log plus signal diagnostics.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    pub candles_processed: usize,
    /// Adjacent candle pairs the classifier saw: every candle after the first,
    /// whether flat or in a position.
    pub signals_evaluated: usize,
    pub signals_matched: usize,
    /// Matched signals rejected by the time window or EMA gate.
    pub signals_filtered: usize,
}

enum State {
    Flat,
    InPosition(Position),
}

/// Sequential long-only simulator. One instance per run configuration; each
/// `run` owns all of its state, so instances never interact.
#[derive(Debug, Clone)]
pub struct TradeSimulator {
    config: SimulatorConfig,
    pattern: PinBarConfig,
    windows: TradingWindows,
    charges: ChargeConfig,
}

impl TradeSimulator {
    pub fn new(
        config: SimulatorConfig,
        pattern: PinBarConfig,
        windows: TradingWindows,
        charges: ChargeConfig,
    ) -> Self {
        Self {
            config,
            pattern,
            windows,
            charges,
        }
    }

    /// Run the full pipeline over a candle series.
    ///
    /// Validates the series first: strictly increasing timestamps, sane OHLC.
    /// A series too short to form a pattern (fewer than 2 candles) is a valid
    /// run with an empty trade log, not an error.
    pub fn run(&self, candles: &[Candle]) -> Result<BacktestResult, BacktestError> {
        validate_series(candles)?;

        let ema = if self.config.use_ema_filter {
            Some(ema_series(candles, self.config.ema_period))
        } else {
            None
        };

        let mut trades = Vec::new();
        let mut signals_evaluated = 0usize;
        let mut signals_matched = 0usize;
        let mut signals_filtered = 0usize;
        let mut state = State::Flat;

        for (i, candle) in candles.iter().enumerate() {
            // The classifier runs on every adjacent pair regardless of
            // position state, so the counters describe the whole series.
            let matched = if i > 0 {
                signals_evaluated += 1;
                let signal = classify(&candles[i - 1], candle, i, &self.pattern);
                if signal.matched {
                    signals_matched += 1;
                }
                signal.matched
            } else {
                false
            };

            state = match state {
                State::InPosition(position) => {
                    // A matched signal here is dropped, never queued.
                    match self.exit_trigger(&position, candle) {
                        Some((exit_price, reason)) => {
                            trades.push(self.close_position(position, i, candle, exit_price, reason));
                            State::Flat
                        }
                        None => State::InPosition(position),
                    }
                }
                State::Flat if matched => {
                    if i + 1 == candles.len() {
                        // No forward candle to exit on; an entry here would
                        // close itself at the same price and timestamp.
                        State::Flat
                    } else if !self.admits_entry(candle, ema.as_deref(), i) {
                        signals_filtered += 1;
                        State::Flat
                    } else {
                        State::InPosition(self.open_position(i, candle))
                    }
                }
                State::Flat => State::Flat,
            };
        }

        // Terminal state must be Flat: force-close anything still open.
        if let State::InPosition(position) = state {
            let last_index = candles.len() - 1;
            let last = &candles[last_index];
            trades.push(self.close_position(
                position,
                last_index,
                last,
                last.close,
                ExitReason::EndOfData,
            ));
        }

        Ok(BacktestResult {
            trades,
            candles_processed: candles.len(),
            signals_evaluated,
            signals_matched,
            signals_filtered,
        })
    }

    fn admits_entry(&self, candle: &Candle, ema: Option<&[Decimal]>, index: usize) -> bool {
        if self.config.use_time_filter && !self.windows.admits(candle.timestamp) {
            return false;
        }
        match ema {
            Some(values) => candle.close > values[index],
            None => true,
        }
    }

    fn open_position(&self, index: usize, candle: &Candle) -> Position {
        let entry_price = candle.close;
        let stop_loss = candle.low - self.config.stop_loss_buffer_points;
        let risk = entry_price - stop_loss;
        let take_profit = entry_price + risk * self.config.risk_reward_ratio;
        let position = Position {
            entry_index: index,
            entry_time: candle.timestamp,
            entry_price,
            stop_loss,
            take_profit,
            quantity: self.config.quantity(),
        };
        debug!(
            entry = %position.entry_price,
            stop = %position.stop_loss,
            target = %position.take_profit,
            quantity = position.quantity,
            at = %position.entry_time,
            "opened position"
        );
        position
    }

    /// Exit check for one forward candle, honoring the configured tie-break.
    fn exit_trigger(&self, position: &Position, candle: &Candle) -> Option<(Decimal, ExitReason)> {
        let stop_hit = candle.low <= position.stop_loss;
        let target_hit = candle.high >= position.take_profit;
        match self.config.exit_priority {
            ExitPriority::StopLossFirst => {
                if stop_hit {
                    Some((position.stop_loss, ExitReason::StopLoss))
                } else if target_hit {
                    Some((position.take_profit, ExitReason::TakeProfit))
                } else {
                    None
                }
            }
            ExitPriority::TakeProfitFirst => {
                if target_hit {
                    Some((position.take_profit, ExitReason::TakeProfit))
                } else if stop_hit {
                    Some((position.stop_loss, ExitReason::StopLoss))
                } else {
                    None
                }
            }
        }
    }

    fn close_position(
        &self,
        position: Position,
        exit_index: usize,
        exit_candle: &Candle,
        exit_price: Decimal,
        exit_reason: ExitReason,
    ) -> Trade {
        let quantity = position.quantity;
        let gross_pnl = (exit_price - position.entry_price) * Decimal::from(quantity);
        let charges = self
            .charges
            .estimate(position.entry_price, exit_price, quantity);
        let net_pnl = gross_pnl - charges.total();
        debug!(
            entry = %position.entry_price,
            exit = %exit_price,
            reason = ?exit_reason,
            gross = %gross_pnl,
            net = %net_pnl,
            "closed position"
        );
        Trade {
            entry_index: position.entry_index,
            entry_time: position.entry_time,
            entry_price: position.entry_price,
            exit_index,
            exit_time: exit_candle.timestamp,
            exit_price,
            exit_reason,
            quantity,
            gross_pnl,
            charges,
            net_pnl,
        }
    }
}

impl Default for TradeSimulator {
    fn default() -> Self {
        Self::new(
            SimulatorConfig::default(),
            PinBarConfig::default(),
            TradingWindows::default_strategy(),
            ChargeConfig::default(),
        )
    }
}

/// Reject malformed input before simulation: out-of-order timestamps or
/// insane OHLC are fatal, with the offending index and timestamp reported.
fn validate_series(candles: &[Candle]) -> Result<(), BacktestError> {
    for (index, candle) in candles.iter().enumerate() {
        if !candle.is_sane() {
            return Err(BacktestError::MalformedCandle {
                index,
                timestamp: candle.timestamp,
            });
        }
        if index > 0 && candle.timestamp <= candles[index - 1].timestamp {
            return Err(BacktestError::NonChronological {
                index,
                timestamp: candle.timestamp,
            });
        }
    }
    Ok(())
}
