//! One-shot quote lookup command.

use anyhow::Result;
use idx_config::load_config;
use idx_core::types::QuoteOrigin;
use std::path::Path;

use crate::cli::PriceArgs;

pub async fn run(args: PriceArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let services = super::build_services(&config);

    let resolved = services.resolver.resolve(&args.symbol).await?;

    println!("{}", resolved.symbol);
    println!("Price:  {}", resolved.quote.price);
    println!("Change: {:+.2}%", resolved.quote.change_pct);
    match resolved.origin {
        QuoteOrigin::Live => println!("Origin: live"),
        QuoteOrigin::Cached { observed_at } => {
            println!("Origin: cached (last seen {})", observed_at.to_rfc3339());
        }
    }

    Ok(())
}
