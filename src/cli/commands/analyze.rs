//! Indicator report command.

use anyhow::Result;
use idx_config::load_config;
use idx_core::traits::HistorySource;
use idx_data::YahooChartSource;
use idx_indicators::IndicatorReport;
use std::path::Path;

use crate::cli::AnalyzeArgs;

pub async fn run(args: AnalyzeArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let services = super::build_services(&config);

    let resolved = services.resolver.resolve(&args.symbol).await?;
    let history = YahooChartSource::new();
    let closes = history
        .daily_closes(&resolved.symbol, config.quotes.history_days)
        .await?;
    let report = IndicatorReport::compute(&closes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", resolved.symbol);
    println!("Price:   {} ({:+.2}%)", resolved.quote.price, resolved.quote.change_pct);
    println!("Samples: {}", report.samples);
    if report.has_rsi() {
        println!("RSI(14): {:.2}", report.rsi);
    } else {
        println!("RSI(14): n/a (insufficient history)");
    }
    if report.has_sma20() {
        println!("SMA(20): {:.2}", report.sma20);
    } else {
        println!("SMA(20): n/a (insufficient history)");
    }
    if report.has_macd() {
        println!(
            "MACD:    {:.2}  signal {:.2}  histogram {:.2}",
            report.macd.macd, report.macd.signal, report.macd.histogram
        );
    } else {
        println!("MACD:    n/a (insufficient history)");
    }

    Ok(())
}
