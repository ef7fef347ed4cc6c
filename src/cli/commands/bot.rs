//! Telegram bot command implementation.

use anyhow::{Context, Result};
use idx_bot::{
    run_alert_loop, AlertConfig, BotHandler, CommentaryClient, HandlerConfig, SubscriberStore,
    TelegramClient, WatchlistStore,
};
use idx_config::load_config;
use idx_data::YahooChartSource;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let services = super::build_services(&config);

    let token = std::env::var(&config.telegram.token_env).with_context(|| {
        format!(
            "bot token missing: set the {} environment variable",
            config.telegram.token_env
        )
    })?;
    let telegram = Arc::new(
        TelegramClient::new(&token)
            .with_poll_timeout(Duration::from_secs(config.telegram.poll_timeout_secs)),
    );

    let api_key = std::env::var(&config.commentary.api_key_env).ok();
    if api_key.is_none() {
        warn!(
            env = %config.commentary.api_key_env,
            "no commentary api key, /analisis falls back to technical summaries"
        );
    }
    let commentary = CommentaryClient::new(
        api_key,
        config.commentary.model.clone(),
        config.commentary.max_tokens,
    );

    let data_dir = PathBuf::from(&config.app.data_dir);
    let subscribers = Arc::new(Mutex::new(SubscriberStore::open(
        data_dir.join("subscribers.json"),
    )));
    let watchlists = WatchlistStore::open(data_dir.join("watchlists.json"));

    let handler = BotHandler::new(
        telegram.clone(),
        services.resolver.clone(),
        services.scanner.clone(),
        Arc::new(YahooChartSource::new()),
        services.universe.clone(),
        commentary,
        subscribers.clone(),
        watchlists,
        HandlerConfig {
            history_days: config.quotes.history_days,
            trending_min_pct: config.scan.trending_min_pct,
            trending_top: config.scan.trending_top,
            leaders_top: config.scan.leaders_top,
            momentum_low_pct: config.scan.momentum_low_pct,
            momentum_high_pct: config.scan.momentum_high_pct,
            oversold_floor_pct: config.scan.oversold_floor_pct,
        },
    );

    if config.alerts.enabled {
        tokio::spawn(run_alert_loop(
            telegram,
            services.scanner.clone(),
            services.universe.clone(),
            subscribers,
            AlertConfig {
                interval: Duration::from_secs(config.alerts.interval_mins * 60),
                sample_size: config.alerts.sample_size,
                min_abs_pct: config.alerts.min_abs_pct,
                top: config.alerts.top,
            },
        ));
    } else {
        info!("volatility alerts disabled");
    }

    handler.run().await;
    Ok(())
}
