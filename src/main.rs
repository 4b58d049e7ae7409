//! Kelly Position Sizer
//!
//! Kelly criterion and risk/reward calculators for sizing leveraged
//! positions, with an optional volatility-based stop from recent klines.

mod error;
mod market;
mod models;
mod report;
mod sizing;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::prelude::ToPrimitive;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::market::{BinanceClient, FetchOutcome, VolatilityTracker};
use crate::models::{Direction, DirectionMode, TradeInputs};
use crate::report::{fmt_num, PositionReport, SwingReport};
use crate::sizing::{risk_reward, swing_plan, CalculatorConfig, PositionCalculator, SwingInputs};

/// Kelly position sizing CLI.
#[derive(Parser)]
#[command(name = "kellysizer")]
#[command(about = "Size leveraged positions with the Kelly criterion", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", env = "KELLY_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a position from entry, stop and target prices
    Position {
        /// Entry price
        #[arg(short, long)]
        entry: f64,

        /// Stop-loss price
        #[arg(short, long)]
        stop: f64,

        /// Take-profit price
        #[arg(short, long)]
        target: f64,

        /// Account capital in USDT (defaults to KELLY_CAPITAL or 1000)
        #[arg(short, long)]
        capital: Option<f64>,

        /// Win rate (0-1)
        #[arg(short, long)]
        win_rate: Option<f64>,

        /// Leverage multiple
        #[arg(short, long)]
        leverage: Option<f64>,

        /// Use half Kelly (more conservative)
        #[arg(long)]
        half_kelly: bool,

        /// Trade direction: auto, long or short
        #[arg(short, long, default_value = "auto")]
        direction: DirectionMode,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Risk/reward ratio for a long or short setup
    Ratio {
        /// Entry price
        #[arg(short, long)]
        entry: f64,

        /// Stop-loss price
        #[arg(short, long)]
        stop: f64,

        /// Take-profit price
        #[arg(short, long)]
        target: f64,

        /// Trade direction (inferred from prices when omitted)
        #[arg(short, long)]
        direction: Option<Direction>,
    },

    /// Kelly plan with the stop set by recent volatility
    Kelly {
        #[command(flatten)]
        plan: PlanArgs,

        /// Symbol for the volatility lookup (defaults to KELLY_SYMBOL or ETHUSDT)
        #[arg(long)]
        symbol: Option<String>,

        /// Stop loss in percent; skips the volatility lookup
        #[arg(long)]
        stop_pct: Option<f64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: type symbols, get a fresh plan for each
    Watch {
        #[command(flatten)]
        plan: PlanArgs,

        /// Seconds between checks for a new estimate
        #[arg(long, default_value = "1")]
        refresh: u64,
    },

    /// Show current configuration
    Config,
}

/// Shared parameters for volatility-based plans.
#[derive(Args, Clone)]
struct PlanArgs {
    /// Entry price
    #[arg(short, long)]
    entry: f64,

    /// Account capital in USDT
    #[arg(short, long)]
    capital: Option<f64>,

    /// Target risk/reward ratio b
    #[arg(short = 'b', long)]
    risk_reward: Option<f64>,

    /// Win rate (0-1)
    #[arg(short, long)]
    win_rate: Option<f64>,

    /// Leverage multiple
    #[arg(short, long)]
    leverage: Option<f64>,

    /// Trade direction
    #[arg(short, long, default_value = "long")]
    direction: Direction,

    /// Use full Kelly instead of the default half Kelly
    #[arg(long)]
    full_kelly: bool,
}

impl PlanArgs {
    fn to_inputs(&self, config: &CalculatorConfig, stop_loss_pct: f64) -> Result<SwingInputs> {
        Ok(SwingInputs {
            capital: match self.capital {
                Some(c) => c,
                None => config.capital.to_f64().context("Invalid configured capital")?,
            },
            risk_reward: self.risk_reward.unwrap_or(config.risk_reward),
            win_rate: self.win_rate.unwrap_or(config.win_rate),
            leverage: match self.leverage {
                Some(l) => l,
                None => config.leverage.to_f64().context("Invalid configured leverage")?,
            },
            entry_price: self.entry,
            use_half_kelly: config.half_kelly && !self.full_kelly,
            direction: self.direction,
            stop_loss_pct,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = CalculatorConfig::from_env()?;

    match cli.command {
        Commands::Position {
            entry,
            stop,
            target,
            capital,
            win_rate,
            leverage,
            half_kelly,
            direction,
            json,
        } => {
            let capital = match capital {
                Some(c) => c,
                None => config.capital.to_f64().context("Invalid configured capital")?,
            };
            let leverage = match leverage {
                Some(l) => l,
                None => config.leverage.to_f64().context("Invalid configured leverage")?,
            };

            let inputs = TradeInputs::new(capital, entry, stop, target)
                .with_win_rate(win_rate.unwrap_or(config.win_rate))
                .with_leverage(leverage)
                .with_half_kelly(half_kelly)
                .with_direction(direction);

            let metrics = PositionCalculator::compute(&inputs)
                .context("Check the stop and target relative to the entry price")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                println!("{}", PositionReport { inputs: &inputs, metrics: &metrics });
            }
        }

        Commands::Ratio {
            entry,
            stop,
            target,
            direction,
        } => {
            let direction = match direction.or_else(|| Direction::infer(entry, stop, target)) {
                Some(d) => d,
                None => anyhow::bail!(
                    "Cannot infer direction: stop {} and target {} must be on opposite sides of entry {}",
                    stop,
                    target,
                    entry
                ),
            };

            let b = risk_reward(entry, stop, target, direction);
            let verdict = match b {
                Some(b) if b >= models::FAVORABLE_RISK_REWARD => "favorable",
                Some(_) => "unfavorable",
                None => "undefined",
            };

            println!("Direction:         {}", direction);
            println!("Risk/Reward (b):   {} ({})", fmt_num(b, 2), verdict);
        }

        Commands::Kelly {
            plan,
            symbol,
            stop_pct,
            json,
        } => {
            let symbol = symbol.unwrap_or_else(|| config.symbol.clone()).to_uppercase();

            let stop_loss_pct = match stop_pct {
                Some(pct) => pct / 100.0,
                None => {
                    let client = BinanceClient::with_base_url(config.api_base_url.clone())?;
                    let tracker = VolatilityTracker::new(client, config.interval.clone(), config.bar_limit);

                    let outcome = tracker.request(&symbol).await.context("Volatility fetch task failed")?;
                    match (outcome, tracker.current().await) {
                        (FetchOutcome::Applied, Some(estimate)) => {
                            info!(symbol = %estimate.symbol, bars = estimate.bars, "Using max swing as stop");
                            estimate.swing_pct
                        }
                        _ => anyhow::bail!(
                            "Could not estimate volatility for {}; pass --stop-pct to set the stop manually",
                            symbol
                        ),
                    }
                }
            };

            let inputs = plan.to_inputs(&config, stop_loss_pct)?;
            let result = swing_plan(&inputs);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", SwingReport { symbol: &symbol, plan: &result });
            }
        }

        Commands::Watch { plan, refresh } => {
            let client = BinanceClient::with_base_url(config.api_base_url.clone())?;
            let tracker = VolatilityTracker::new(client, config.interval.clone(), config.bar_limit);
            let mut plan = plan;

            println!("\n=== Kelly Watch ===");
            println!("Interval: {} x {} bars", config.interval, config.bar_limit);
            println!("Type a symbol, optionally followed by an entry price (e.g. BTCUSDT 65000).");
            println!("Press Ctrl+C to stop.\n");

            tracker.request(&config.symbol);

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut ticker = tokio::time::interval(Duration::from_secs(refresh.max(1)));
            let mut shown_generation = 0u64;

            loop {
                tokio::select! {
                    line = lines.next_line() => {
                        let Some(line) = line.context("Failed to read stdin")? else {
                            break;
                        };
                        let mut parts = line.split_whitespace();
                        let Some(symbol) = parts.next() else {
                            continue;
                        };
                        if let Some(entry) = parts.next() {
                            match entry.parse::<f64>() {
                                Ok(e) if e > 0.0 => plan.entry = e,
                                _ => {
                                    println!("Ignoring invalid entry price '{}'", entry);
                                }
                            }
                        }
                        debug!(symbol = %symbol, entry = plan.entry, "Symbol changed");
                        tracker.request(symbol);
                    }
                    _ = ticker.tick() => {
                        let Some(estimate) = tracker.current().await else {
                            continue;
                        };
                        if estimate.generation == shown_generation {
                            continue;
                        }
                        shown_generation = estimate.generation;

                        let inputs = plan.to_inputs(&config, estimate.swing_pct)?;
                        let result = swing_plan(&inputs);
                        println!(
                            "[{}] {} max swing {:.2}% over {} bars",
                            chrono::Local::now().format("%H:%M:%S"),
                            estimate.symbol,
                            estimate.swing_pct * 100.0,
                            estimate.bars
                        );
                        println!("{}", SwingReport { symbol: &estimate.symbol, plan: &result });
                    }
                    _ = tokio::signal::ctrl_c() => {
                        println!("\nStopping watch...");
                        break;
                    }
                }
            }
        }

        Commands::Config => {
            println!("\n=== Calculator Configuration ===\n");
            println!("Price History:");
            println!("  API Base:             {}", config.api_base_url);
            println!("  Symbol:               {}", config.symbol);
            println!("  Interval:             {}", config.interval);
            println!("  Bars:                 {}", config.bar_limit);

            println!("\nSizing Defaults:");
            println!("  Capital:              {} USDT", config.capital);
            println!("  Leverage:             x{}", config.leverage);
            println!("  Win Rate:             {:.0}%", config.win_rate * 100.0);
            println!("  Risk/Reward:          {:.2}", config.risk_reward);
            println!("  Half Kelly:           {}", config.half_kelly);
        }
    }

    Ok(())
}
