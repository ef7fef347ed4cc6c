//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idxbot")]
#[command(author, version, about = "Telegram signal assistant for IDX equities")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot
    Bot,
    /// Resolve a single quote
    Price(PriceArgs),
    /// Compute the indicator report for a symbol
    Analyze(AnalyzeArgs),
    /// Scan the universe with a ranking policy
    Scan(ScanArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct PriceArgs {
    /// Ticker code, with or without the .JK suffix
    pub symbol: String,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Ticker code, with or without the .JK suffix
    pub symbol: String,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Ranking policy to apply
    #[arg(short, long, default_value = "trending")]
    pub policy: ScanPolicy,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScanPolicy {
    /// Gainers above the trending threshold
    Trending,
    /// Top gainers
    Gainers,
    /// Top losers
    Losers,
    /// Momentum band picks (buy morning, sell afternoon)
    Bpjs,
    /// Oversold picks (buy afternoon, sell morning)
    Bsjp,
}
