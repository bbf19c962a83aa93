//! PinBar CLI — run pin-bar backtests over CSV candle exports.
//!
//! Commands:
//! - `run` — execute a backtest from a CSV file, with optional TOML config
//!   and flag overrides, and print the performance summary
//! - `windows` — print the trading windows a config resolves to

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pinbar_core::config::StrategyConfig;
use pinbar_core::data::CsvCandleSource;
use pinbar_core::report::PerformanceSummary;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pinbar",
    about = "PinBar CLI — bullish pin bar backtesting over 5-minute candles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest over a CSV candle export.
    Run {
        /// CSV file with header `timestamp,open,high,low,close`.
        #[arg(long)]
        csv: PathBuf,

        /// Path to a TOML strategy config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Risk:reward ratio override (e.g. 3.5).
        #[arg(long)]
        rr: Option<Decimal>,

        /// Stop-loss buffer override, in points below the signal candle low.
        #[arg(long)]
        stop_buffer: Option<Decimal>,

        /// Number of lots to trade.
        #[arg(long)]
        lots: Option<u32>,

        /// Take every signal regardless of time of day.
        #[arg(long, default_value_t = false)]
        no_time_filter: bool,

        /// Gate entries on close > EMA(7).
        #[arg(long, default_value_t = false)]
        ema_filter: bool,

        /// Print each closed trade.
        #[arg(long, default_value_t = false)]
        trades: bool,

        /// Emit the summary as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the trading windows a config resolves to.
    Windows {
        /// Path to a TOML strategy config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            csv,
            config,
            rr,
            stop_buffer,
            lots,
            no_time_filter,
            ema_filter,
            trades,
            json,
        } => run_backtest(
            csv,
            config,
            rr,
            stop_buffer,
            lots,
            no_time_filter,
            ema_filter,
            trades,
            json,
        ),
        Commands::Windows { config } => print_windows(config),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<StrategyConfig> {
    match path {
        Some(path) => StrategyConfig::from_toml_file(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(StrategyConfig::default()),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_backtest(
    csv: PathBuf,
    config_path: Option<PathBuf>,
    rr: Option<Decimal>,
    stop_buffer: Option<Decimal>,
    lots: Option<u32>,
    no_time_filter: bool,
    ema_filter: bool,
    print_trades: bool,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(rr) = rr {
        config.risk_reward_ratio = rr;
    }
    if let Some(buffer) = stop_buffer {
        config.stop_loss_buffer_points = buffer;
    }
    if let Some(lots) = lots {
        config.lot_size = lots;
    }
    if no_time_filter {
        config.use_time_filter = false;
    }
    if ema_filter {
        config.use_ema_filter = true;
    }

    let simulator = config.build_simulator()?;
    let candles = CsvCandleSource::new(&csv)
        .load()
        .with_context(|| format!("loading candles from {}", csv.display()))?;
    let result = simulator.run(&candles).context("backtest failed")?;
    let summary = PerformanceSummary::compute(&result.trades);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if print_trades {
        println!("closed trades:");
        for trade in &result.trades {
            println!(
                "  {}  {:>10.2} -> {:>10.2}  {:<12}  qty {:>4}  net {:>10.2}",
                trade.entry_time.format("%Y-%m-%d %H:%M"),
                trade.entry_price,
                trade.exit_price,
                format!("{:?}", trade.exit_reason),
                trade.quantity,
                trade.net_pnl,
            );
        }
        println!();
    }

    println!("candles processed   {}", result.candles_processed);
    println!(
        "signals             {} matched / {} evaluated ({} filtered)",
        result.signals_matched, result.signals_evaluated, result.signals_filtered
    );
    println!("trades              {}", summary.total_trades);
    println!(
        "wins / losses       {} / {}  (win rate {:.1}%)",
        summary.wins,
        summary.losses,
        summary.win_rate * Decimal::from(100)
    );
    println!("gross profit        {:.2}", summary.gross_profit);
    println!("gross loss          {:.2}", summary.gross_loss);
    match summary.profit_factor {
        Some(pf) => println!("profit factor       {pf:.2}"),
        None => println!("profit factor       inf (no losing trades)"),
    }
    println!("total charges       {:.2}", summary.total_charges);
    println!("net P&L             {:.2}", summary.net_pnl);
    println!("avg net per trade   {:.2}", summary.avg_net_pnl);
    println!("max win / max loss  {:.2} / {:.2}", summary.max_win, summary.max_loss);

    if !summary.by_month.is_empty() {
        println!("\nby month:");
        for (month, stats) in &summary.by_month {
            println!(
                "  {month}  trades {:>3}  wins {:>3}  net {:>12.2}",
                stats.trades, stats.wins, stats.net_pnl
            );
        }
    }
    if !summary.by_hour.is_empty() {
        println!("\nby entry hour:");
        for (hour, stats) in &summary.by_hour {
            println!(
                "  {hour:02}:00  trades {:>3}  wins {:>3}  net {:>12.2}",
                stats.trades, stats.wins, stats.net_pnl
            );
        }
    }

    Ok(())
}

fn print_windows(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    println!(
        "time filter: {}",
        if config.use_time_filter { "on" } else { "off" }
    );
    for window in &config.trading_windows {
        println!(
            "  {:02}:{:02} - {:02}:{:02}",
            window.start_hour, window.start_minute, window.end_hour, window.end_minute
        );
    }
    Ok(())
}
