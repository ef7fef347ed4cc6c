//! Fallback chaining of quote sources.

use async_trait::async_trait;
use idx_core::error::FetchError;
use idx_core::traits::QuoteSource;
use idx_core::types::{Quote, Symbol};
use std::sync::Arc;
use tracing::debug;

/// Tries a list of quote sources in order; the first success wins.
///
/// Lets providers be swapped or stacked behind the single [`QuoteSource`]
/// contract without touching the resolver.
pub struct ChainedQuoteSource {
    sources: Vec<Arc<dyn QuoteSource>>,
}

impl ChainedQuoteSource {
    pub fn new(sources: Vec<Arc<dyn QuoteSource>>) -> Self {
        assert!(!sources.is_empty(), "chain needs at least one source");
        Self { sources }
    }
}

#[async_trait]
impl QuoteSource for ChainedQuoteSource {
    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, FetchError> {
        let mut last_err = FetchError::Network("no sources tried".to_string());

        for source in &self.sources {
            match source.fetch(symbol).await {
                Ok(quote) => return Ok(quote),
                Err(e) => {
                    debug!(%symbol, source = source.name(), error = %e, "source failed, trying next");
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }

    fn name(&self) -> &str {
        "chained"
    }
}
