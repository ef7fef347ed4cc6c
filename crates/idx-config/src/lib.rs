//! Configuration management.

mod settings;

pub use settings::{
    AlertSettings, AppConfig, AppSettings, CommentarySettings, LoggingConfig, QuoteSettings,
    ScanSettings, TelegramSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment overrides use the `IDX` prefix with `__` as separator,
/// e.g. `IDX__QUOTES__FETCH_TIMEOUT_SECS=10`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("IDX")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
