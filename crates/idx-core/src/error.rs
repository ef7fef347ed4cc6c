//! Error types for the signal bot.

use thiserror::Error;

/// Top-level signal bot error.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single live-fetch failure.
///
/// The variants exist for observability only; the resolver treats every
/// kind identically (fall back to the cache).
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Fetch timed out")]
    Timeout,

    #[error("Request rejected with status {status}")]
    Rejected { status: u16 },

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Quote and history data errors.
#[derive(Error, Debug)]
pub enum DataError {
    /// Both the live fetch and the cache lookup failed.
    #[error("Data unavailable for {0}")]
    Unavailable(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DataError {
    /// Whether this error means no data exists anywhere for the symbol.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DataError::Unavailable(_))
    }
}

/// Chat/notification delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Telegram API error: {0}")]
    Api(String),

    /// The recipient blocked the bot (HTTP 403); prune the subscription.
    #[error("Bot blocked by chat {chat_id}")]
    Blocked { chat_id: i64 },
}

/// Result type alias for signal bot operations.
pub type SignalResult<T> = Result<T, SignalError>;
