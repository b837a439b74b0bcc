//! `td-trader`: command-line driver for the TD Ameritrade client.
//!
//! Credentials come from the environment (or a `.env` file). Every command
//! logs to the append-only log file; `--stdout` mirrors it to the terminal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tokio::time::MissedTickBehavior;

use tdameritrade_rs::api::OrderOutcome;
use tdameritrade_rs::logging::{self, LogConfig, DEFAULT_LOG_FILE};
use tdameritrade_rs::models::{FrequencyType, Instruction, PeriodType, PriceHistoryQuery};
use tdameritrade_rs::{ClientConfig, Credentials, Result, TdClient};

#[derive(Parser, Debug)]
#[command(name = "td-trader", version, about = "TD Ameritrade price history and order placement")]
struct Args {
    /// File that log lines are appended to
    #[arg(long, env = "TD_LOG_FILE", default_value = DEFAULT_LOG_FILE, global = true)]
    log_file: PathBuf,

    /// Also print log lines to stdout
    #[arg(long, global = true)]
    stdout: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange the refresh token for an access token
    Token,

    /// Fetch price history for a symbol
    History {
        /// Ticker symbol
        symbol: String,

        #[command(flatten)]
        window: Window,
    },

    /// Place a single-leg limit order
    Order {
        /// Ticker symbol
        symbol: String,

        /// Order instruction, e.g. BUY_TO_OPEN
        #[arg(long, default_value = "BUY_TO_OPEN")]
        instruction: Instruction,

        /// Number of shares
        #[arg(long, default_value_t = 1)]
        quantity: u32,

        /// Limit price; omitted means no price constraint
        #[arg(long)]
        price: Option<Decimal>,
    },

    /// Poll price history on a fixed interval until Ctrl+C
    Run {
        /// Ticker symbol
        #[arg(long, default_value = "AAPL")]
        symbol: String,

        /// Seconds between polls
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: u64,

        #[command(flatten)]
        window: Window,
    },
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct Window {
    /// Unit of the period: hour, day, month, year, ytd
    #[arg(long, default_value = "hour")]
    period_type: PeriodType,

    /// Number of period units
    #[arg(long, default_value_t = 1)]
    period: u32,

    /// Unit of the candle frequency: minute, daily, weekly, monthly
    #[arg(long, default_value = "minute")]
    frequency_type: FrequencyType,

    /// Number of frequency units per candle
    #[arg(long, default_value_t = 1)]
    frequency: u32,
}

impl From<Window> for PriceHistoryQuery {
    fn from(window: Window) -> Self {
        PriceHistoryQuery::new()
            .period(window.period_type, window.period)
            .frequency(window.frequency_type, window.frequency)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init(&LogConfig::new(&args.log_file).with_stdout(args.stdout))?;

    let client = TdClient::connect(Credentials::from_env(), ClientConfig::default()).await?;

    match args.command {
        Command::Token => token(&client, &args.log_file).await,
        Command::History { symbol, window } => history(&client, &symbol, window.into()).await,
        Command::Order {
            symbol,
            instruction,
            quantity,
            price,
        } => order(&client, &symbol, instruction, quantity, price).await,
        Command::Run {
            symbol,
            interval_secs,
            window,
        } => {
            run(
                &client,
                &symbol,
                window.into(),
                Duration::from_secs(interval_secs),
            )
            .await
        }
    }

    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

async fn token(client: &TdClient, log_file: &Path) {
    if client.auth().current_token().await.is_some() {
        println!("Access token refreshed");
    } else {
        println!("Access token refresh failed, see {}", log_file.display());
    }
}

async fn history(client: &TdClient, symbol: &str, query: PriceHistoryQuery) {
    let Some(response) = client.market_data().price_history(symbol, query).await else {
        println!("No reply for {} after retries", symbol);
        return;
    };

    println!("HTTP {}", response.status);
    if !response.is_success() {
        println!("{}", response.body);
        return;
    }
    match response.json::<tdameritrade_rs::models::PriceHistory>() {
        Ok(history) => {
            println!("{} candles for {}", history.candles.len(), symbol);
            if let Some(candle) = history.latest() {
                println!(
                    "latest {}: open {} high {} low {} close {} volume {}",
                    candle.datetime, candle.open, candle.high, candle.low, candle.close, candle.volume
                );
            }
        }
        Err(_) => println!("{}", response.body),
    }
}

async fn order(
    client: &TdClient,
    symbol: &str,
    instruction: Instruction,
    quantity: u32,
    price: Option<Decimal>,
) {
    match client
        .orders()
        .place(symbol, instruction, quantity, price)
        .await
    {
        OrderOutcome::Placed { order_id } => match order_id {
            Some(id) => println!("Order placed, id {}", id),
            None => println!("Order placed"),
        },
        OrderOutcome::Rejected { status, body } => println!("Order rejected ({}): {}", status, body),
        OrderOutcome::Failed { reason } => println!("Order failed: {}", reason),
    }
}

async fn run(client: &TdClient, symbol: &str, query: PriceHistoryQuery, every: Duration) {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };
    run_until(client, symbol, query, every, shutdown).await;
}

/// Poll every `every` until `shutdown` resolves, abandoning any poll in
/// flight at that moment.
async fn run_until<S>(
    client: &TdClient,
    symbol: &str,
    query: PriceHistoryQuery,
    every: Duration,
    shutdown: S,
) where
    S: std::future::Future<Output = ()>,
{
    tracing::info!(symbol, interval_secs = every.as_secs(), "Starting price polling");
    let mut ticker = tokio::time::interval(every);
    // A poll stalled in retries delays the next one; missed ticks are dropped.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = async {
                ticker.tick().await;
                poll(client, symbol, query).await;
            } => {}
        }
    }
}

async fn poll(client: &TdClient, symbol: &str, query: PriceHistoryQuery) {
    let Some(history) = client.market_data().candles(symbol, query).await else {
        return;
    };

    match history.latest() {
        Some(candle) => tracing::info!(
            symbol,
            close = %candle.close,
            at = %candle.datetime,
            "Latest close for {}: {}",
            symbol,
            candle.close
        ),
        None => tracing::warn!(symbol, "Price history contained no candles"),
    }
}
