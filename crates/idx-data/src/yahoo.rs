//! Yahoo Finance chart history source.
//!
//! Fetches daily closes from the public chart JSON endpoint. Used only to
//! feed the indicator engine; nothing fetched here is persisted.

use crate::BROWSER_USER_AGENT;
use async_trait::async_trait;
use idx_core::error::DataError;
use idx_core::traits::HistorySource;
use idx_core::types::Symbol;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Daily close history via `query1.finance.yahoo.com/v8/finance/chart`.
pub struct YahooChartSource {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl YahooChartSource {
    pub fn new() -> Self {
        Self::with_base_url("https://query1.finance.yahoo.com/v8/finance/chart".to_string())
    }

    /// Point the source at an alternate endpoint (used by tests).
    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Map a requested day count onto Yahoo's coarse `range` values.
    fn range_for_days(days: u32) -> &'static str {
        match days {
            0..=5 => "5d",
            6..=20 => "1mo",
            21..=60 => "3mo",
            61..=120 => "6mo",
            _ => "1y",
        }
    }
}

impl Default for YahooChartSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistorySource for YahooChartSource {
    async fn daily_closes(&self, symbol: &Symbol, days: u32) -> Result<Vec<f64>, DataError> {
        let url = format!(
            "{}/{}?range={}&interval=1d",
            self.base_url,
            symbol.as_str(),
            Self::range_for_days(days)
        );
        debug!(%symbol, %url, "fetching chart history");

        let response = tokio::time::timeout(self.timeout, self.client.get(&url).send())
            .await
            .map_err(|_| DataError::History("chart request timed out".to_string()))?
            .map_err(|e| DataError::History(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::History(format!(
                "chart request rejected: {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DataError::History(e.to_string()))?;

        let closes = parse_chart_closes(&body)?;
        // The range is coarser than the request; trim to what was asked.
        let start = closes.len().saturating_sub(days as usize);
        Ok(closes[start..].to_vec())
    }

    fn name(&self) -> &str {
        "yahoo-chart"
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    close: Vec<Option<f64>>,
}

/// Extract the close series from a chart response.
///
/// Null closes (holidays, halted sessions) are dropped so the series
/// stays dense for the indicator engine.
fn parse_chart_closes(body: &str) -> Result<Vec<f64>, DataError> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    let result = envelope
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| DataError::Parse("empty chart result".to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::Parse("missing quote block".to_string()))?;

    Ok(quote.close.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "BBCA.JK"},
                "timestamp": [1, 2, 3, 4],
                "indicators": {
                    "quote": [{
                        "close": [9000.0, null, 9100.0, 9050.0]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_closes_drops_nulls() {
        let closes = parse_chart_closes(FIXTURE).unwrap();
        assert_eq!(closes, vec![9000.0, 9100.0, 9050.0]);
    }

    #[test]
    fn test_parse_chart_empty_result_fails() {
        let body = r#"{"chart": {"result": [], "error": null}}"#;
        assert!(parse_chart_closes(body).is_err());

        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#;
        assert!(parse_chart_closes(body).is_err());
    }

    #[test]
    fn test_parse_chart_garbage_fails() {
        assert!(parse_chart_closes("<html>blocked</html>").is_err());
    }

    #[test]
    fn test_range_mapping() {
        assert_eq!(YahooChartSource::range_for_days(5), "5d");
        assert_eq!(YahooChartSource::range_for_days(45), "3mo");
        assert_eq!(YahooChartSource::range_for_days(200), "1y");
    }
}
