//! Quote snapshot types.

use super::Symbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot of a symbol's market state.
///
/// Scraped sources often only populate `price` and `change_pct`; the
/// remaining fields default to zero. A `price` of zero means "no data",
/// never a valid zero price — some exchanges halt at 0 intraday and the
/// bot cannot distinguish that from failure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    /// Current price
    pub price: f64,
    /// Percent change from previous close
    pub change_pct: f64,
    /// Absolute change from previous close
    #[serde(default)]
    pub change: f64,
    /// Day high
    #[serde(default)]
    pub high: f64,
    /// Day low
    #[serde(default)]
    pub low: f64,
    /// Day open
    #[serde(default)]
    pub open: f64,
    /// Previous close
    #[serde(default)]
    pub prev_close: f64,
}

impl Quote {
    /// Create a quote from the fields scraped sources reliably provide.
    pub fn from_price(price: f64, change_pct: f64) -> Self {
        Self {
            price,
            change_pct,
            ..Default::default()
        }
    }

    /// Whether the quote carries usable price data.
    pub fn has_data(&self) -> bool {
        self.price > 0.0
    }
}

/// A cached last-known-good quote.
///
/// Created or overwritten on every successful live fetch, read (never
/// mutated) on fallback, and never expired: it stays valid indefinitely as
/// a degraded answer, distinguished from a live one by [`QuoteOrigin`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub symbol: Symbol,
    pub quote: Quote,
    pub observed_at: DateTime<Utc>,
}

/// Whether a resolved quote came from the live source or the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteOrigin {
    /// Fetched from the upstream source just now.
    Live,
    /// Served from the durable cache; `observed_at` is when the quote was
    /// last seen live. The caller is responsible for surfacing staleness.
    Cached { observed_at: DateTime<Utc> },
}

impl QuoteOrigin {
    pub fn is_cached(&self) -> bool {
        matches!(self, QuoteOrigin::Cached { .. })
    }
}

/// A quote annotated with its symbol and origin, as returned by the
/// resolver and collected by the scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedQuote {
    pub symbol: Symbol,
    pub quote: Quote,
    pub origin: QuoteOrigin,
}

impl ResolvedQuote {
    /// Shorthand for the percent change, used heavily by ranking policies.
    pub fn change_pct(&self) -> f64 {
        self.quote.change_pct
    }
}
