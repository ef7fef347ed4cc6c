//! Chunked concurrent quote scanning.

use futures::future::join_all;
use idx_core::error::DataError;
use idx_core::types::{ResolvedQuote, Symbol};
use idx_data::QuoteResolver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Concurrency and rate budget for a scan.
///
/// Chunk size is a throughput tunable, not a correctness parameter; the
/// inter-chunk delay is the sole backpressure protecting the upstream
/// source from being hammered.
#[derive(Debug, Clone, Copy)]
pub struct ScanBudget {
    /// Symbols resolved concurrently per chunk
    pub chunk_size: usize,
    /// Pause between chunks
    pub inter_batch_delay: Duration,
}

impl Default for ScanBudget {
    fn default() -> Self {
        Self {
            chunk_size: 12,
            inter_batch_delay: Duration::from_millis(100),
        }
    }
}

/// Scans a symbol universe through the resolver, keeping partial results.
///
/// A per-symbol failure (including `DataError::Unavailable`) drops that
/// symbol from the output; the scan itself never aborts. Output carries
/// no ordering guarantee — ranking policies sort explicitly.
pub struct BatchScanner {
    resolver: Arc<QuoteResolver>,
    budget: ScanBudget,
}

impl BatchScanner {
    pub fn new(resolver: Arc<QuoteResolver>) -> Self {
        Self {
            resolver,
            budget: ScanBudget::default(),
        }
    }

    pub fn with_budget(mut self, budget: ScanBudget) -> Self {
        assert!(budget.chunk_size > 0, "chunk size must be positive");
        self.budget = budget;
        self
    }

    /// Resolve all symbols, chunk by chunk, and keep the successes.
    pub async fn scan(&self, symbols: &[Symbol]) -> Vec<ResolvedQuote> {
        let mut outcomes: Vec<Result<ResolvedQuote, DataError>> =
            Vec::with_capacity(symbols.len());
        let chunks: Vec<&[Symbol]> = symbols.chunks(self.budget.chunk_size).collect();
        let last = chunks.len().saturating_sub(1);

        for (i, chunk) in chunks.into_iter().enumerate() {
            let futures = chunk.iter().map(|s| self.resolver.resolve_symbol(s));
            outcomes.extend(join_all(futures).await);

            if i < last {
                tokio::time::sleep(self.budget.inter_batch_delay).await;
            }
        }

        let results = collect_successes(outcomes);
        info!(
            scanned = symbols.len(),
            resolved = results.len(),
            "scan complete"
        );
        results
    }

    pub fn budget(&self) -> ScanBudget {
        self.budget
    }
}

/// Filter scan outcomes down to the successes.
///
/// The explicit per-item `Result` makes the drop a named, tested step
/// rather than a side effect of error suppression.
fn collect_successes(outcomes: Vec<Result<ResolvedQuote, DataError>>) -> Vec<ResolvedQuote> {
    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            Ok(quote) => Some(quote),
            Err(e) => {
                debug!(error = %e, "symbol dropped from scan");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use idx_core::error::FetchError;
    use idx_core::traits::QuoteSource;
    use idx_core::types::{Quote, QuoteOrigin};
    use idx_data::QuoteCache;

    struct StubSource {
        serves: Vec<(&'static str, f64, f64)>,
    }

    #[async_trait]
    impl QuoteSource for StubSource {
        async fn fetch(&self, symbol: &Symbol) -> Result<Quote, FetchError> {
            self.serves
                .iter()
                .find(|(code, _, _)| Symbol::parse(code) == *symbol)
                .map(|(_, price, change_pct)| Quote::from_price(*price, *change_pct))
                .ok_or(FetchError::Timeout)
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn scanner_with(serves: Vec<(&'static str, f64, f64)>) -> (BatchScanner, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("idx-scan-{}.json", uuid::Uuid::new_v4()));
        let resolver = QuoteResolver::new(
            Arc::new(StubSource { serves }),
            QuoteCache::open(path.clone()),
        );
        (BatchScanner::new(Arc::new(resolver)), path)
    }

    fn symbols(codes: &[&str]) -> Vec<Symbol> {
        codes.iter().map(|c| Symbol::parse(c)).collect()
    }

    #[tokio::test]
    async fn test_partial_success_keeps_partial_results() {
        let (scanner, path) =
            scanner_with(vec![("BBCA", 9000.0, 1.0), ("TLKM", 3500.0, -0.5)]);

        // Third symbol fails (stub times out) and is silently dropped.
        let results = scanner.scan(&symbols(&["BBCA", "TLKM", "GHOST"])).await;

        assert_eq!(results.len(), 2);
        let mut resolved: Vec<&str> = results.iter().map(|r| r.symbol.code()).collect();
        resolved.sort();
        assert_eq!(resolved, vec!["BBCA", "TLKM"]);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_not_error() {
        let (scanner, path) = scanner_with(vec![]);
        let results = scanner.scan(&symbols(&["A", "B", "C"])).await;
        assert!(results.is_empty());
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_scan_spans_multiple_chunks() {
        let (scanner, path) = scanner_with(vec![
            ("S1", 10.0, 1.0),
            ("S2", 20.0, 2.0),
            ("S3", 30.0, 3.0),
            ("S4", 40.0, 4.0),
            ("S5", 50.0, 5.0),
        ]);
        let scanner = scanner.with_budget(ScanBudget {
            chunk_size: 2,
            inter_batch_delay: Duration::from_millis(1),
        });

        let results = scanner.scan(&symbols(&["S1", "S2", "S3", "S4", "S5"])).await;
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.origin == QuoteOrigin::Live));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_symbol_association_retained() {
        let (scanner, path) = scanner_with(vec![("BBCA", 9000.0, 1.0)]);
        let results = scanner.scan(&symbols(&["BBCA"])).await;
        assert_eq!(results[0].symbol.as_str(), "BBCA.JK");
        assert_eq!(results[0].quote.price, 9000.0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_collect_successes_is_a_pure_filter() {
        let ok = ResolvedQuote {
            symbol: Symbol::parse("BBCA"),
            quote: Quote::from_price(9000.0, 1.0),
            origin: QuoteOrigin::Cached {
                observed_at: Utc::now(),
            },
        };
        let outcomes = vec![
            Ok(ok.clone()),
            Err(DataError::Unavailable("GHOST.JK".to_string())),
        ];

        let kept = collect_successes(outcomes);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].symbol, ok.symbol);
    }
}
