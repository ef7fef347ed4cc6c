//! Configuration structures.

use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub quotes: QuoteSettings,
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub alerts: AlertSettings,
    #[serde(default)]
    pub commentary: CommentarySettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    /// Directory for the quote cache and subscriber/watchlist stores
    pub data_dir: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "idxbot".to_string(),
            data_dir: "data".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Telegram bot settings. The token itself comes from the environment
/// (`TELEGRAM_TOKEN`), never from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    pub token_env: String,
    /// Long-poll timeout passed to getUpdates, seconds
    pub poll_timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            token_env: "TELEGRAM_TOKEN".to_string(),
            poll_timeout_secs: 30,
        }
    }
}

/// Quote acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    /// Hard deadline for a single live fetch, seconds
    pub fetch_timeout_secs: u64,
    /// Days of daily closes fetched for analysis (45 gives RSI(14),
    /// SMA(20), and MACD(26) headroom over market holidays)
    pub history_days: u32,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 5,
            history_days: 45,
        }
    }
}

/// Scanner and ranking policy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Symbols resolved concurrently per chunk
    pub chunk_size: usize,
    /// Pause between chunks, milliseconds
    pub inter_batch_delay_ms: u64,
    /// Override the built-in liquid universe with these ticker codes
    #[serde(default)]
    pub universe: Vec<String>,
    /// Minimum percent gain for /trending
    pub trending_min_pct: f64,
    /// Picks shown by /trending
    pub trending_top: usize,
    /// Picks shown by /topgainers and /losers
    pub leaders_top: usize,
    /// Momentum (BPJS) band, percent
    pub momentum_low_pct: f64,
    pub momentum_high_pct: f64,
    /// Oversold (BSJP) floor, percent
    pub oversold_floor_pct: f64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            chunk_size: 12,
            inter_batch_delay_ms: 100,
            universe: vec![],
            trending_min_pct: 2.0,
            trending_top: 15,
            leaders_top: 10,
            momentum_low_pct: 1.5,
            momentum_high_pct: 10.0,
            oversold_floor_pct: -8.0,
        }
    }
}

/// Periodic volatility alert settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    pub enabled: bool,
    /// Minutes between alert scans
    pub interval_mins: u64,
    /// Random sample size drawn from the universe each run
    pub sample_size: usize,
    /// Minimum absolute percent change to alert on
    pub min_abs_pct: f64,
    /// Alerts per broadcast
    pub top: usize,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_mins: 30,
            sample_size: 50,
            min_abs_pct: 4.0,
            top: 8,
        }
    }
}

/// Optional LLM commentary for /analisis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentarySettings {
    /// API key environment variable; commentary is skipped when unset
    pub api_key_env: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for CommentarySettings {
    fn default() -> Self {
        Self {
            api_key_env: "GROQ_API_KEY".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            max_tokens: 450,
        }
    }
}
