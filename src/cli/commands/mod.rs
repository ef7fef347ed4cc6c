//! CLI command implementations.

pub mod analyze;
pub mod bot;
pub mod price;
pub mod scan;
pub mod validate;

use idx_config::AppConfig;
use idx_data::{GoogleFinanceSource, QuoteCache, QuoteResolver};
use idx_scanner::{BatchScanner, ScanBudget, Universe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// The quote-side services every command needs.
pub(crate) struct Services {
    pub resolver: Arc<QuoteResolver>,
    pub scanner: Arc<BatchScanner>,
    pub universe: Universe,
}

pub(crate) fn build_services(config: &AppConfig) -> Services {
    let cache_path = PathBuf::from(&config.app.data_dir).join("quotes.json");
    let resolver = Arc::new(
        QuoteResolver::new(
            Arc::new(GoogleFinanceSource::new()),
            QuoteCache::open(cache_path),
        )
        .with_timeout(Duration::from_secs(config.quotes.fetch_timeout_secs)),
    );

    let scanner = Arc::new(BatchScanner::new(resolver.clone()).with_budget(ScanBudget {
        chunk_size: config.scan.chunk_size,
        inter_batch_delay: Duration::from_millis(config.scan.inter_batch_delay_ms),
    }));

    let universe = if config.scan.universe.is_empty() {
        Universe::liquid()
    } else {
        Universe::from_codes(config.scan.universe.iter().map(String::as_str))
    };

    Services {
        resolver,
        scanner,
        universe,
    }
}
