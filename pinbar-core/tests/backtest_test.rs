//! End-to-end pipeline tests: CSV text → candles → simulator → report.

use chrono::{DateTime, FixedOffset};
use pinbar_core::charges::ChargeConfig;
use pinbar_core::config::StrategyConfig;
use pinbar_core::data::csv_source::read_candles;
use pinbar_core::domain::{Candle, ExitReason};
use pinbar_core::report::PerformanceSummary;
use rust_decimal::Decimal;

fn at(day: u32, hh_mm: &str) -> DateTime<FixedOffset> {
    format!("2025-06-{day:02}T{hh_mm}:00+05:30").parse().unwrap()
}

fn candle(day: u32, hh_mm: &str, open: i64, high: i64, low: i64, close: i64) -> Candle {
    Candle {
        timestamp: at(day, hh_mm),
        open: Decimal::from(open),
        high: Decimal::from(high),
        low: Decimal::from(low),
        close: Decimal::from(close),
    }
}

/// Two sessions, two signals: the first trade hits its target, the second its
/// stop. Entry 101 → stop 85, target 157; entry 201 → stop 185, target 257.
fn two_trade_series() -> Vec<Candle> {
    vec![
        // Day 2: winner.
        candle(2, "11:00", 100, 101, 97, 98),
        candle(2, "11:05", 98, 102, 90, 101),
        candle(2, "11:10", 101, 120, 100, 118),
        candle(2, "11:15", 118, 158, 117, 150),
        // Day 3: loser.
        candle(3, "13:30", 200, 201, 197, 198),
        candle(3, "13:35", 198, 202, 190, 201),
        candle(3, "13:40", 201, 203, 184, 186),
        // Quiet tail.
        candle(3, "13:45", 186, 188, 185, 187),
    ]
}

#[test]
fn full_pipeline_produces_expected_trades_and_summary() {
    let simulator = StrategyConfig::default().build_simulator().unwrap();
    let result = simulator.run(&two_trade_series()).unwrap();

    assert_eq!(result.trades.len(), 2);
    assert_eq!(result.candles_processed, 8);

    let winner = &result.trades[0];
    assert_eq!(winner.exit_reason, ExitReason::TakeProfit);
    assert_eq!(winner.entry_price, Decimal::from(101));
    assert_eq!(winner.exit_price, Decimal::from(157));
    assert_eq!(winner.gross_pnl, Decimal::from(56 * 25));
    assert!(winner.entry_time < winner.exit_time);

    let loser = &result.trades[1];
    assert_eq!(loser.exit_reason, ExitReason::StopLoss);
    assert_eq!(loser.entry_price, Decimal::from(201));
    assert_eq!(loser.exit_price, Decimal::from(185));
    assert_eq!(loser.gross_pnl, Decimal::from(-16 * 25));

    let summary = PerformanceSummary::compute(&result.trades);
    assert_eq!(summary.total_trades, 2);
    assert_eq!(summary.wins, 1);
    assert_eq!(summary.losses, 1);
    assert_eq!(summary.win_rate, Decimal::new(5, 1));
    assert_eq!(summary.gross_profit, Decimal::from(1400));
    assert_eq!(summary.gross_loss, Decimal::from(400));
    assert_eq!(
        summary.profit_factor,
        Some(Decimal::from(1400) / Decimal::from(400))
    );
    // Round-trip identity across the whole log.
    assert_eq!(
        summary.net_pnl,
        summary.gross_profit - summary.gross_loss - summary.total_charges
    );
    // One bucket per entry hour.
    assert_eq!(summary.by_hour[&11].trades, 1);
    assert_eq!(summary.by_hour[&13].trades, 1);
    assert_eq!(summary.by_month["2025-06"].trades, 2);
}

#[test]
fn csv_text_feeds_the_simulator() {
    let csv = "\
timestamp,open,high,low,close
2025-06-02T11:00:00+05:30,100,101,97,98
2025-06-02T11:05:00+05:30,98,102,90,101
2025-06-02T11:10:00+05:30,101,158,100,150
";
    let candles = read_candles(csv.as_bytes()).unwrap();
    let simulator = StrategyConfig::default().build_simulator().unwrap();
    let result = simulator.run(&candles).unwrap();
    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].exit_reason, ExitReason::TakeProfit);
}

/// Prices engineered so the engine's round trip reproduces the reference
/// charge scenario: buy 25 @ 23905.30, sell @ 23983.52 → ₹169.53 total.
///
/// With risk:reward 2 the signal candle (low 23871.19, close 23905.30) puts
/// the stop at 23866.19, risk 39.11, and the target at exactly 23983.52.
#[test]
fn charges_match_reference_breakdown_through_the_engine() {
    let px = |v: i64| Decimal::new(v, 2);
    let candles = vec![
        Candle {
            timestamp: at(2, "11:00"),
            open: px(23_910_00),
            high: px(23_912_00),
            low: px(23_893_00),
            close: px(23_896_00), // red
        },
        Candle {
            timestamp: at(2, "11:05"),
            open: px(23_895_19),
            high: px(23_911_19),
            low: px(23_871_19),
            close: px(23_905_30), // pin bar
        },
        Candle {
            timestamp: at(2, "11:10"),
            open: px(23_950_00),
            high: px(23_990_00),
            low: px(23_900_00),
            close: px(23_980_00), // crosses the target
        },
    ];

    let config = StrategyConfig {
        risk_reward_ratio: Decimal::from(2),
        ..StrategyConfig::default()
    };
    let result = config.build_simulator().unwrap().run(&candles).unwrap();

    assert_eq!(result.trades.len(), 1);
    let trade = &result.trades[0];
    assert_eq!(trade.entry_price, px(23_905_30));
    assert_eq!(trade.exit_price, px(23_983_52));
    assert_eq!(trade.exit_reason, ExitReason::TakeProfit);

    let expected = ChargeConfig::default().estimate(trade.entry_price, trade.exit_price, 25);
    assert_eq!(trade.charges, expected);
    assert_eq!(trade.charges.total().round_dp(2), Decimal::new(169_53, 2));
    assert_eq!(trade.gross_pnl, px(1_955_50));
    assert_eq!(trade.net_pnl, trade.gross_pnl - trade.charges.total());
}

#[test]
fn summary_is_recomputable_and_stable() {
    let simulator = StrategyConfig::default().build_simulator().unwrap();
    let result = simulator.run(&two_trade_series()).unwrap();
    let first = PerformanceSummary::compute(&result.trades);
    let second = PerformanceSummary::compute(&result.trades);
    assert_eq!(first.net_pnl, second.net_pnl);
    assert_eq!(first.by_month, second.by_month);
}

#[test]
fn runs_are_independent() {
    // Two simulators over the same series cannot interact: identical output.
    let series = two_trade_series();
    let a = StrategyConfig::default().build_simulator().unwrap();
    let b = StrategyConfig::default().build_simulator().unwrap();
    let ra = a.run(&series).unwrap();
    let rb = b.run(&series).unwrap();
    assert_eq!(ra.trades.len(), rb.trades.len());
    for (ta, tb) in ra.trades.iter().zip(&rb.trades) {
        assert_eq!(ta.net_pnl, tb.net_pnl);
        assert_eq!(ta.exit_reason, tb.exit_reason);
    }
}
