//! Historical data trait definition.

use crate::error::DataError;
use crate::types::Symbol;
use async_trait::async_trait;

/// A provider of historical daily closes.
///
/// Feeds the indicator engine; series are fetched fresh per analysis
/// request and never persisted by the core.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch up to `days` of daily close prices, ordered oldest first.
    ///
    /// Missing sessions (holidays, halts) are simply absent; callers must
    /// check the returned length against indicator minimums rather than
    /// assume one close per calendar day.
    async fn daily_closes(&self, symbol: &Symbol, days: u32) -> Result<Vec<f64>, DataError>;

    /// Get the source name, used in logs.
    fn name(&self) -> &str;
}
