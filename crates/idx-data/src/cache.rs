//! Durable quote cache.

use chrono::{DateTime, Utc};
use idx_core::error::DataError;
use idx_core::types::{CacheEntry, Quote, Symbol};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Durable symbol -> last-known-good quote store.
///
/// Loaded from a JSON file at construction and flushed on every `put` —
/// no write buffering, so a crash cannot lose the most recent quote.
/// Entries never expire; a cached quote is a valid degraded answer
/// indefinitely, annotated with its observation time by the resolver.
///
/// Writes are idempotent whole-entry overwrites keyed by symbol, so
/// last-writer-wins is safe without per-symbol locking.
pub struct QuoteCache {
    entries: HashMap<Symbol, CacheEntry>,
    path: PathBuf,
}

impl QuoteCache {
    /// Open the cache backed by the given file.
    ///
    /// A missing file starts an empty cache; a corrupt file is logged and
    /// discarded rather than failing startup.
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<Symbol, CacheEntry>>(&raw) {
                Ok(entries) => {
                    debug!(count = entries.len(), path = %path.display(), "quote cache loaded");
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "quote cache corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self { entries, path }
    }

    /// Look up the last-known-good entry for a symbol.
    pub fn get(&self, symbol: &Symbol) -> Option<&CacheEntry> {
        self.entries.get(symbol)
    }

    /// Overwrite the entry for a symbol and flush to disk.
    pub fn put(
        &mut self,
        symbol: Symbol,
        quote: Quote,
        observed_at: DateTime<Utc>,
    ) -> Result<(), DataError> {
        self.entries.insert(
            symbol.clone(),
            CacheEntry {
                symbol,
                quote,
                observed_at,
            },
        );
        self.flush()
    }

    /// Number of cached symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| DataError::Cache(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| DataError::Cache(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| DataError::Cache(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("idx-cache-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_put_get_roundtrip() {
        let path = scratch_path();
        let mut cache = QuoteCache::open(path.clone());

        let symbol = Symbol::parse("BBCA");
        let quote = Quote::from_price(9000.0, 1.2);
        let now = Utc::now();
        cache.put(symbol.clone(), quote, now).unwrap();

        let entry = cache.get(&symbol).unwrap();
        assert_eq!(entry.quote.price, 9000.0);
        assert_eq!(entry.observed_at, now);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_survives_reopen() {
        let path = scratch_path();
        let symbol = Symbol::parse("TLKM");
        let now = Utc::now();

        {
            let mut cache = QuoteCache::open(path.clone());
            cache
                .put(symbol.clone(), Quote::from_price(3500.0, -0.5), now)
                .unwrap();
        }

        let cache = QuoteCache::open(path.clone());
        let entry = cache.get(&symbol).unwrap();
        assert_eq!(entry.quote.price, 3500.0);
        assert_eq!(entry.quote.change_pct, -0.5);
        assert_eq!(entry.observed_at, now);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_put_is_idempotent() {
        let path = scratch_path();
        let mut cache = QuoteCache::open(path.clone());

        let symbol = Symbol::parse("GOTO");
        let quote = Quote::from_price(60.0, 3.4);
        let now = Utc::now();

        cache.put(symbol.clone(), quote, now).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        cache.put(symbol.clone(), quote, now).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(first, second);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_overwrite_is_last_writer_wins() {
        let path = scratch_path();
        let mut cache = QuoteCache::open(path.clone());

        let symbol = Symbol::parse("ANTM");
        cache
            .put(symbol.clone(), Quote::from_price(1500.0, 0.0), Utc::now())
            .unwrap();
        cache
            .put(symbol.clone(), Quote::from_price(1550.0, 3.3), Utc::now())
            .unwrap();

        assert_eq!(cache.get(&symbol).unwrap().quote.price, 1550.0);
        assert_eq!(cache.len(), 1);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = scratch_path();
        fs::write(&path, "not json at all").unwrap();

        let cache = QuoteCache::open(path.clone());
        assert!(cache.is_empty());

        fs::remove_file(path).ok();
    }
}
