//! Validate configuration command.

use anyhow::Result;
use idx_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Data dir: {}", config.app.data_dir);
            println!("Log level: {}", config.logging.level);
            println!("Fetch timeout: {}s", config.quotes.fetch_timeout_secs);
            println!("Scan chunk size: {}", config.scan.chunk_size);
            println!(
                "Universe: {}",
                if config.scan.universe.is_empty() {
                    "built-in liquid list".to_string()
                } else {
                    format!("{} custom codes", config.scan.universe.len())
                }
            );
            println!(
                "Alerts: {} (every {} min, |change| > {}%)",
                if config.alerts.enabled { "enabled" } else { "disabled" },
                config.alerts.interval_mins,
                config.alerts.min_abs_pct
            );
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
