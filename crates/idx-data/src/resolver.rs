//! Live-then-cache quote resolution.

use crate::QuoteCache;
use chrono::Utc;
use idx_core::error::{DataError, FetchError};
use idx_core::traits::QuoteSource;
use idx_core::types::{Quote, QuoteOrigin, ResolvedQuote, Symbol};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Default hard deadline for a single live fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// The central quote contract: fetch live, fall back to cache, fail only
/// on a total miss.
///
/// Any fetch failure — timeout, rejection, malformed markup, or a zero
/// price — is handled locally by consulting the cache, so per-symbol
/// degradation stays local instead of aborting batch operations. A
/// timed-out fetch is abandoned, never retried.
///
/// The cache is the only shared mutable state; it is locked briefly and
/// never across an await point.
pub struct QuoteResolver {
    source: Arc<dyn QuoteSource>,
    cache: Mutex<QuoteCache>,
    fetch_timeout: Duration,
}

impl QuoteResolver {
    pub fn new(source: Arc<dyn QuoteSource>, cache: QuoteCache) -> Self {
        Self {
            source,
            cache: Mutex::new(cache),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Resolve arbitrary user input into a quote.
    ///
    /// Input is normalized to the canonical symbol first, so `bbca` and
    /// `BBCA.JK` hit the same cache entry.
    pub async fn resolve(&self, input: &str) -> Result<ResolvedQuote, DataError> {
        let symbol = Symbol::parse(input);
        self.resolve_symbol(&symbol).await
    }

    /// Resolve an already-canonical symbol.
    pub async fn resolve_symbol(&self, symbol: &Symbol) -> Result<ResolvedQuote, DataError> {
        match self.fetch_live(symbol).await {
            Ok(quote) => {
                let observed_at = Utc::now();
                {
                    let mut cache = self.cache.lock().expect("cache lock poisoned");
                    if let Err(e) = cache.put(symbol.clone(), quote, observed_at) {
                        // A flush failure degrades durability, not the answer.
                        warn!(%symbol, error = %e, "cache flush failed");
                    }
                }
                Ok(ResolvedQuote {
                    symbol: symbol.clone(),
                    quote,
                    origin: QuoteOrigin::Live,
                })
            }
            Err(fetch_err) => {
                debug!(%symbol, error = %fetch_err, "live fetch failed, consulting cache");
                let cached = {
                    let cache = self.cache.lock().expect("cache lock poisoned");
                    cache.get(symbol).cloned()
                };
                match cached {
                    Some(entry) => Ok(ResolvedQuote {
                        symbol: symbol.clone(),
                        quote: entry.quote,
                        origin: QuoteOrigin::Cached {
                            observed_at: entry.observed_at,
                        },
                    }),
                    None => Err(DataError::Unavailable(symbol.to_string())),
                }
            }
        }
    }

    /// Number of symbols currently in the fallback cache.
    pub fn cached_symbols(&self) -> usize {
        self.cache.lock().expect("cache lock poisoned").len()
    }

    async fn fetch_live(&self, symbol: &Symbol) -> Result<Quote, FetchError> {
        let quote = tokio::time::timeout(self.fetch_timeout, self.source.fetch(symbol))
            .await
            .map_err(|_| FetchError::Timeout)??;

        // Upstream occasionally renders a zero price after hours; treat it
        // as no data so it neither poisons the cache nor reaches callers.
        if !quote.has_data() {
            return Err(FetchError::Parse("zero price".to_string()));
        }

        Ok(quote)
    }
}
