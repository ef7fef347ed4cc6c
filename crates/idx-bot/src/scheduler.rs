//! Periodic volatility-alert scheduler.
//!
//! Every interval, scan a random sample of the universe, pick the
//! biggest absolute movers, and broadcast them to subscribers. Chats
//! that blocked the bot are pruned from the store after each broadcast.

use crate::format;
use crate::store::SubscriberStore;
use crate::telegram::TelegramClient;
use idx_scanner::{rank, BatchScanner, Universe};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Alert scheduling and selection parameters.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Time between alert runs
    pub interval: Duration,
    /// Symbols sampled from the universe per run
    pub sample_size: usize,
    /// Minimum absolute percent change to alert on
    pub min_abs_pct: f64,
    /// Maximum names per alert
    pub top: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 60),
            sample_size: 50,
            min_abs_pct: 4.0,
            top: 8,
        }
    }
}

/// Run the alert loop forever.
///
/// The first run happens one full interval after startup; restarting the
/// bot should not immediately re-send the alert everyone just got.
pub async fn run_alert_loop(
    telegram: Arc<TelegramClient>,
    scanner: Arc<BatchScanner>,
    universe: Universe,
    subscribers: Arc<Mutex<SubscriberStore>>,
    config: AlertConfig,
) {
    info!(
        interval_secs = config.interval.as_secs(),
        sample = config.sample_size,
        "alert scheduler started"
    );

    let mut interval = tokio::time::interval(config.interval);
    // The first tick completes immediately; consume it.
    interval.tick().await;

    loop {
        interval.tick().await;

        let chat_ids: Vec<i64> = {
            let subscribers = subscribers.lock().expect("subscriber lock poisoned");
            subscribers.chat_ids().to_vec()
        };
        if chat_ids.is_empty() {
            debug!("no subscribers, skipping alert run");
            continue;
        }

        // Sampling spreads scan load over runs instead of hammering the
        // whole universe every half hour.
        let sample = universe.sample(config.sample_size);
        let quotes = scanner.scan(&sample).await;
        let picks = rank::volatility_alerts(&quotes, config.min_abs_pct, config.top);

        if picks.is_empty() {
            debug!(scanned = quotes.len(), "no volatility above threshold");
            continue;
        }

        info!(
            picks = picks.len(),
            subscribers = chat_ids.len(),
            "broadcasting volatility alert"
        );
        let blocked = telegram
            .broadcast(&chat_ids, &format::alert_message(&picks))
            .await;

        if !blocked.is_empty() {
            let mut subscribers = subscribers.lock().expect("subscriber lock poisoned");
            if let Err(e) = subscribers.prune(&blocked) {
                warn!(error = %e, "failed to prune blocked subscribers");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alert_config() {
        let config = AlertConfig::default();
        assert_eq!(config.interval, Duration::from_secs(1800));
        assert_eq!(config.sample_size, 50);
        assert_eq!(config.min_abs_pct, 4.0);
        assert_eq!(config.top, 8);
    }
}
