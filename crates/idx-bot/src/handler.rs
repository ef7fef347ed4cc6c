//! Command dispatch.
//!
//! One long-polling loop, one handler per incoming message. Slow
//! commands (anything that scans the universe) send a status placeholder
//! first and edit it with the result, so chats see progress instead of a
//! half-minute of silence.

use crate::command::{BotCommand, WatchlistAction};
use crate::commentary::CommentaryClient;
use crate::format;
use crate::store::{SubscriberStore, WatchlistChange, WatchlistStore};
use crate::telegram::TelegramClient;
use idx_core::error::NotifyError;
use idx_core::traits::HistorySource;
use idx_core::types::ResolvedQuote;
use idx_data::QuoteResolver;
use idx_indicators::IndicatorReport;
use idx_scanner::{rank, BatchScanner, Universe};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Pause after a failed `getUpdates` before polling again.
const POLL_BACKOFF: Duration = Duration::from_secs(5);

/// Thresholds for the ranked commands.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Days of history fetched for `/analisis`
    pub history_days: u32,
    /// `/trending` minimum percent change
    pub trending_min_pct: f64,
    /// `/trending` list length
    pub trending_top: usize,
    /// `/topgainers` and `/losers` list length
    pub leaders_top: usize,
    /// `/bpjs` band, exclusive
    pub momentum_low_pct: f64,
    pub momentum_high_pct: f64,
    /// `/bsjp` floor, exclusive
    pub oversold_floor_pct: f64,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            history_days: 45,
            trending_min_pct: 2.0,
            trending_top: 15,
            leaders_top: 10,
            momentum_low_pct: 1.5,
            momentum_high_pct: 10.0,
            oversold_floor_pct: -8.0,
        }
    }
}

/// Dispatches parsed commands against the core services.
pub struct BotHandler {
    telegram: Arc<TelegramClient>,
    resolver: Arc<QuoteResolver>,
    scanner: Arc<BatchScanner>,
    history: Arc<dyn HistorySource>,
    universe: Universe,
    commentary: CommentaryClient,
    subscribers: Arc<Mutex<SubscriberStore>>,
    watchlists: Mutex<WatchlistStore>,
    config: HandlerConfig,
}

impl BotHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        telegram: Arc<TelegramClient>,
        resolver: Arc<QuoteResolver>,
        scanner: Arc<BatchScanner>,
        history: Arc<dyn HistorySource>,
        universe: Universe,
        commentary: CommentaryClient,
        subscribers: Arc<Mutex<SubscriberStore>>,
        watchlists: WatchlistStore,
        config: HandlerConfig,
    ) -> Self {
        Self {
            telegram,
            resolver,
            scanner,
            history,
            universe,
            commentary,
            subscribers,
            watchlists: Mutex::new(watchlists),
            config,
        }
    }

    /// Long-poll for updates and handle them until the task is aborted.
    pub async fn run(&self) {
        info!(universe = self.universe.len(), "bot handler started");
        let mut offset = 0i64;

        loop {
            let updates = match self.telegram.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!(error = %e, "getUpdates failed, backing off");
                    tokio::time::sleep(POLL_BACKOFF).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                let Some(message) = update.message else { continue };
                let Some(text) = message.text else { continue };

                if let Err(e) = self.handle_text(message.chat.id, &text).await {
                    warn!(chat_id = message.chat.id, error = %e, "command reply failed");
                }
            }
        }
    }

    /// Handle one message text from a chat.
    pub async fn handle_text(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let command = BotCommand::parse(text);
        debug!(chat_id, ?command, "dispatching");

        match command {
            BotCommand::Help => {
                self.telegram
                    .send_message(chat_id, &format::help_text(self.universe.len()))
                    .await?;
            }
            BotCommand::Price { code } => self.price(chat_id, &code).await?,
            BotCommand::Analyze { code } => self.analyze(chat_id, &code).await?,
            BotCommand::Trending => {
                self.scan_command(chat_id, |quotes, config| {
                    let picks =
                        rank::top_movers(quotes, config.trending_min_pct, config.trending_top);
                    format::trending_message(&picks, quotes.len())
                })
                .await?;
            }
            BotCommand::TopGainers => {
                self.scan_command(chat_id, |quotes, config| {
                    let picks = rank::top_movers(quotes, 0.0, config.leaders_top);
                    format::gainers_message(&picks)
                })
                .await?;
            }
            BotCommand::Losers => {
                self.scan_command(chat_id, |quotes, config| {
                    let picks = rank::top_losers(quotes, config.leaders_top);
                    format::losers_message(&picks)
                })
                .await?;
            }
            BotCommand::Bpjs => {
                self.scan_command(chat_id, |quotes, config| {
                    let picks = rank::momentum_candidates(
                        quotes,
                        config.momentum_low_pct,
                        config.momentum_high_pct,
                    );
                    format::picks_message(
                        "🌅",
                        "Beli Pagi Jual Sore",
                        &picks,
                        quotes.len(),
                        "Tidak ada momentum di sweet spot hari ini",
                    )
                })
                .await?;
            }
            BotCommand::Bsjp => {
                self.scan_command(chat_id, |quotes, config| {
                    let picks = rank::oversold_candidates(quotes, config.oversold_floor_pct);
                    format::picks_message(
                        "🌙",
                        "Beli Sore Jual Pagi",
                        &picks,
                        quotes.len(),
                        "Tidak ada kandidat oversold yang layak",
                    )
                })
                .await?;
            }
            BotCommand::Watchlist(action) => self.watchlist(chat_id, action).await?,
            BotCommand::Subscribe => {
                let added = {
                    let mut subscribers =
                        self.subscribers.lock().expect("subscriber lock poisoned");
                    subscribers.add(chat_id)
                };
                let reply = match added {
                    Ok(true) => "🔔 *Subscribed\\!* Alert volatilitas tiap 30 menit\\.",
                    Ok(false) => "Sudah subscribe kok 👍",
                    Err(e) => {
                        error!(chat_id, error = %e, "subscriber store write failed");
                        "⚠️ Gagal menyimpan, coba lagi nanti\\."
                    }
                };
                self.telegram.send_message(chat_id, reply).await?;
            }
            BotCommand::Unsubscribe => {
                let removed = {
                    let mut subscribers =
                        self.subscribers.lock().expect("subscriber lock poisoned");
                    subscribers.remove(chat_id)
                };
                let reply = match removed {
                    Ok(true) => "🔕 *Unsubscribed\\.* Sampai jumpa\\!",
                    Ok(false) => "Belum subscribe 🤷",
                    Err(e) => {
                        error!(chat_id, error = %e, "subscriber store write failed");
                        "⚠️ Gagal menyimpan, coba lagi nanti\\."
                    }
                };
                self.telegram.send_message(chat_id, reply).await?;
            }
            BotCommand::MissingArg { usage } => {
                self.telegram
                    .send_message(chat_id, &format::escape_markdown(usage))
                    .await?;
            }
            // Plain chatter and unknown commands stay unanswered so the
            // bot does not spam group chats.
            BotCommand::Unknown => {}
        }

        Ok(())
    }

    async fn price(&self, chat_id: i64, code: &str) -> Result<(), NotifyError> {
        let reply = match self.resolver.resolve(code).await {
            Ok(quote) => format::price_message(&quote),
            Err(e) => {
                debug!(code, error = %e, "price lookup failed");
                format::unavailable_message(code)
            }
        };
        self.telegram.send_message(chat_id, &reply).await?;
        Ok(())
    }

    async fn analyze(&self, chat_id: i64, code: &str) -> Result<(), NotifyError> {
        let status_id = self
            .telegram
            .send_message(chat_id, "⏳ _Analyzing\\.\\.\\._")
            .await?;

        let quote = match self.resolver.resolve(code).await {
            Ok(quote) => quote,
            Err(e) => {
                debug!(code, error = %e, "analysis lookup failed");
                return self
                    .telegram
                    .edit_message(chat_id, status_id, &format::unavailable_message(code))
                    .await;
            }
        };

        // History is best-effort: a failed chart fetch degrades to a
        // sentinel-zero report, not an error reply.
        let closes = match self
            .history
            .daily_closes(&quote.symbol, self.config.history_days)
            .await
        {
            Ok(closes) => closes,
            Err(e) => {
                warn!(symbol = %quote.symbol, error = %e, "history fetch failed");
                Vec::new()
            }
        };

        let report = IndicatorReport::compute(&closes);
        let commentary = self.commentary.commentary(&quote, &report).await;
        let reply = format::analysis_message(&quote, &report, &commentary);
        self.telegram.edit_message(chat_id, status_id, &reply).await
    }

    /// Shared flow for every full-universe command: status placeholder,
    /// scan, rank, edit.
    async fn scan_command<F>(&self, chat_id: i64, render: F) -> Result<(), NotifyError>
    where
        F: FnOnce(&[ResolvedQuote], &HandlerConfig) -> String,
    {
        let status_id = self
            .telegram
            .send_message(
                chat_id,
                &format!(
                    "🔍 _Scanning {} saham\\.\\.\\._",
                    format::escape_markdown(&self.universe.len().to_string())
                ),
            )
            .await?;

        let quotes = self.scanner.scan(self.universe.symbols()).await;
        let reply = render(&quotes, &self.config);
        self.telegram.edit_message(chat_id, status_id, &reply).await
    }

    async fn watchlist(&self, chat_id: i64, action: WatchlistAction) -> Result<(), NotifyError> {
        match action {
            WatchlistAction::Show => {
                let codes: Vec<String> = {
                    let watchlists = self.watchlists.lock().expect("watchlist lock poisoned");
                    watchlists.codes(chat_id).to_vec()
                };

                let mut rows: Vec<(String, Option<ResolvedQuote>)> =
                    Vec::with_capacity(codes.len());
                for code in codes {
                    let quote = self.resolver.resolve(&code).await.ok();
                    rows.push((code, quote));
                }

                self.telegram
                    .send_message(chat_id, &format::watchlist_message(&rows))
                    .await?;
            }
            WatchlistAction::Add(code) => {
                let change = {
                    let mut watchlists = self.watchlists.lock().expect("watchlist lock poisoned");
                    watchlists.add(chat_id, &code)
                };
                let reply = match change {
                    Ok(change) => watchlist_reply(&code, change),
                    Err(e) => {
                        error!(chat_id, error = %e, "watchlist store write failed");
                        "⚠️ Gagal menyimpan, coba lagi nanti\\.".to_string()
                    }
                };
                self.telegram.send_message(chat_id, &reply).await?;
            }
            WatchlistAction::Remove(code) => {
                let change = {
                    let mut watchlists = self.watchlists.lock().expect("watchlist lock poisoned");
                    watchlists.remove(chat_id, &code)
                };
                let reply = match change {
                    Ok(change) => watchlist_reply(&code, change),
                    Err(e) => {
                        error!(chat_id, error = %e, "watchlist store write failed");
                        "⚠️ Gagal menyimpan, coba lagi nanti\\.".to_string()
                    }
                };
                self.telegram.send_message(chat_id, &reply).await?;
            }
        }
        Ok(())
    }
}

/// User-facing confirmation for a watchlist mutation.
fn watchlist_reply(code: &str, change: WatchlistChange) -> String {
    let code = format::escape_markdown(code);
    match change {
        WatchlistChange::Added => format!("✅ *{code}* masuk watchlist\\!"),
        WatchlistChange::AlreadyPresent => format!("*{code}* sudah ada di watchlist 👍"),
        WatchlistChange::Removed => format!("🗑️ *{code}* dihapus dari watchlist\\."),
        WatchlistChange::NotPresent => format!("*{code}* tidak ada di watchlist 🤷"),
        WatchlistChange::Full => "Watchlist penuh\\! Hapus dulu sebelum menambah\\.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = HandlerConfig::default();
        assert_eq!(config.history_days, 45);
        assert_eq!(config.trending_min_pct, 2.0);
        assert_eq!(config.momentum_low_pct, 1.5);
        assert_eq!(config.momentum_high_pct, 10.0);
        assert_eq!(config.oversold_floor_pct, -8.0);
    }

    #[test]
    fn test_watchlist_replies_name_the_code() {
        assert!(watchlist_reply("BBCA", WatchlistChange::Added).contains("BBCA"));
        assert!(watchlist_reply("BBCA", WatchlistChange::Removed).contains("dihapus"));
        assert!(watchlist_reply("BBCA", WatchlistChange::Full).contains("penuh"));
    }
}
