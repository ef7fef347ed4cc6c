//! Universe scan command.

use anyhow::Result;
use idx_config::load_config;
use idx_scanner::rank;
use std::path::Path;
use tracing::info;

use crate::cli::{ScanArgs, ScanPolicy};

pub async fn run(args: ScanArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let services = super::build_services(&config);

    info!(universe = services.universe.len(), "scanning");
    let quotes = services.scanner.scan(services.universe.symbols()).await;

    let scan = &config.scan;
    let picks = match args.policy {
        ScanPolicy::Trending => {
            rank::top_movers(&quotes, scan.trending_min_pct, scan.trending_top)
        }
        ScanPolicy::Gainers => rank::top_movers(&quotes, 0.0, scan.leaders_top),
        ScanPolicy::Losers => rank::top_losers(&quotes, scan.leaders_top),
        ScanPolicy::Bpjs => {
            rank::momentum_candidates(&quotes, scan.momentum_low_pct, scan.momentum_high_pct)
        }
        ScanPolicy::Bsjp => rank::oversold_candidates(&quotes, scan.oversold_floor_pct),
    };

    println!(
        "Resolved {}/{} symbols",
        quotes.len(),
        services.universe.len()
    );
    if picks.is_empty() {
        println!("No picks for this policy right now.");
        return Ok(());
    }

    for (i, pick) in picks.iter().enumerate() {
        let origin = if pick.origin.is_cached() { " (cached)" } else { "" };
        println!(
            "{:>2}. {:<10} {:>10}  {:+.2}%{}",
            i + 1,
            pick.symbol.code(),
            pick.quote.price,
            pick.change_pct(),
            origin
        );
    }

    Ok(())
}
