use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use market_data_ingestor::models::market::Market;
use signal_engine::{Horizon, Strategy};

#[derive(Parser)]
#[command(author, version, about = "Technical indicators, pattern labels and a heuristic score for a ticker")]
pub struct Cli {
    /// Path to the config file (stock-dashboard.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Shared passphrase, when the config enables the access gate
    #[arg(long, global = true, env = "STOCK_DASHBOARD_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single ticker
    Analyze(AnalyzeArgs),

    /// Analyze several tickers and print a score table
    Scan(ScanArgs),
}

/// Options shared by every analysis.
#[derive(Args, Clone)]
pub struct TradeArgs {
    /// Market the codes belong to: us or tw
    #[arg(long, default_value = "us")]
    pub market: Market,

    /// conservative, aggressive, breakout or day-trade
    #[arg(long, default_value = "conservative")]
    pub strategy: Strategy,

    /// short, mid or long
    #[arg(long, default_value = "mid")]
    pub horizon: Horizon,

    /// Cash available for one position
    #[arg(long, default_value_t = 100_000.0)]
    pub budget: f64,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Ticker code (e.g. "AAPL", or "2330" with --market tw)
    #[arg(long)]
    pub ticker: String,

    #[command(flatten)]
    pub trade: TradeArgs,

    /// Recompute the profit projection at this buy price
    #[arg(long)]
    pub buy_price: Option<f64>,

    /// Write the indicator frame to this file or directory (.json, or .feather)
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Comma-separated list of tickers (e.g. "AAPL,MSFT,NVDA")
    #[arg(long, value_delimiter = ',', required = true)]
    pub tickers: Vec<String>,

    #[command(flatten)]
    pub trade: TradeArgs,

    /// Hide rows scoring below this
    #[arg(long, default_value_t = 0)]
    pub min_score: u8,

    /// Also send the table through the configured notifier
    #[arg(long)]
    pub notify: bool,
}
