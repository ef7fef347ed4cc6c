//! Quote source trait definition.

use crate::error::FetchError;
use crate::types::{Quote, Symbol};
use async_trait::async_trait;

/// A provider of live quotes for single symbols.
///
/// The resolver depends only on this capability, not on any concrete
/// upstream; implementations may scrape markup, call a structured API, or
/// chain other sources behind the same contract. A [`FetchError`] carries
/// enough detail for logging but is otherwise opaque to callers, which
/// treat every failure the same way (fall back to the cache).
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch a live quote for a canonical symbol.
    ///
    /// Implementations must not block indefinitely; callers additionally
    /// enforce a hard deadline and abandon the fetch on expiry.
    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, FetchError>;

    /// Get the source name, used in logs.
    fn name(&self) -> &str;
}
