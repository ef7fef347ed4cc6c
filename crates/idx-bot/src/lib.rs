//! Telegram chat layer for the signal bot.
//!
//! Thin wrappers around the core: a long-polling Bot API client, command
//! parsing and dispatch, MarkdownV2 message formatting, JSON-backed
//! subscriber/watchlist stores, the periodic volatility-alert scheduler,
//! and optional LLM commentary for deep analysis.

pub mod command;
pub mod commentary;
pub mod format;
pub mod handler;
pub mod scheduler;
pub mod store;
pub mod telegram;

pub use command::{BotCommand, WatchlistAction};
pub use commentary::CommentaryClient;
pub use handler::{BotHandler, HandlerConfig};
pub use scheduler::{run_alert_loop, AlertConfig};
pub use store::{SubscriberStore, WatchlistChange, WatchlistStore};
pub use telegram::TelegramClient;
