use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

use stockbot::config::Settings;
use stockbot::logging::setup_logging;
use stockbot::{DecisionEngine, PaperBroker, Trade, TracingLogService, TradeSide};

/// Run the threshold rule once against a paper broker
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Ticker to evaluate
    #[arg(short, long)]
    ticker: String,

    /// Side of the last trade (buy, sell or none)
    #[arg(long, default_value = "buy")]
    last_side: TradeSide,

    /// Price of the last trade
    #[arg(long)]
    last_price: Option<Decimal>,

    /// Current market price. Leave out to simulate a missing quote.
    #[arg(short, long)]
    current_price: Option<Decimal>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;
    setup_logging(&settings.log_filter);

    tracing::info!(
        threshold_pct = %settings.threshold_pct,
        quantity = %settings.quantity,
        "📊 stockbot starting"
    );

    let broker = PaperBroker::new();
    broker.record_trade(last_trade(&args)?);
    if let Some(price) = args.current_price {
        broker.set_price(&args.ticker, price);
    }

    let engine = DecisionEngine::with_strategy(&broker, TracingLogService, settings.strategy());
    let trade = engine.decide(&args.ticker);

    println!("{}", serde_json::to_string_pretty(&trade)?);
    Ok(())
}

fn last_trade(args: &Args) -> Result<Trade> {
    let side = args.last_side;
    if side == TradeSide::None {
        return Ok(Trade::none(&args.ticker));
    }

    let Some(price) = args.last_price else {
        bail!("--last-price is required when --last-side is {}", side);
    };
    Ok(match side {
        TradeSide::Sell => Trade::sell(&args.ticker, price, Utc::now()),
        _ => Trade::buy(&args.ticker, price, Utc::now()),
    })
}
