//! Quote acquisition and caching.
//!
//! The fault-tolerant core of the bot: live quotes are scraped from a
//! best-effort public source with no SLA, so every fetch failure falls
//! back to a durable last-known-good cache and only a total miss surfaces
//! to callers. See [`QuoteResolver`] for the central contract.

mod cache;
mod chain;
mod google;
mod resolver;
mod yahoo;

pub use cache::QuoteCache;
pub use chain::ChainedQuoteSource;
pub use google::GoogleFinanceSource;
pub use resolver::QuoteResolver;
pub use yahoo::YahooChartSource;

/// Browser User-Agent sent to scraped endpoints; default clients get
/// blocked or served degraded markup.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
