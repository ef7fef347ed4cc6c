//! Google Finance quote scraper.
//!
//! Primary live source for IDX symbols. Google Finance has no quote API,
//! so this scrapes the public quote page and extracts the price and the
//! day's percent change from the rendered markup. Best effort by nature:
//! class names can rotate and the endpoint rate-limits aggressively,
//! which is exactly why the resolver backs every fetch with the cache.

use crate::BROWSER_USER_AGENT;
use async_trait::async_trait;
use idx_core::error::FetchError;
use idx_core::traits::QuoteSource;
use idx_core::types::{Quote, Symbol};
use scraper::{Html, Selector};
use tracing::debug;

const PRICE_SELECTOR: &str = ".YMlKec.fxKbKc";
const CHANGE_PCT_SELECTOR: &str = ".JwB6zf";

/// Live quote source scraping `google.com/finance`.
pub struct GoogleFinanceSource {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleFinanceSource {
    pub fn new() -> Self {
        Self::with_base_url("https://www.google.com/finance/quote".to_string())
    }

    /// Point the scraper at an alternate endpoint (used by tests).
    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }
}

impl Default for GoogleFinanceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for GoogleFinanceSource {
    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, FetchError> {
        let url = format!("{}/{}", self.base_url, symbol.google_id());
        debug!(%symbol, %url, "fetching quote page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Rejected {
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        parse_quote_page(&html)
    }

    fn name(&self) -> &str {
        "google-finance"
    }
}

/// Extract a quote from a Google Finance quote page.
///
/// Pure so it can be tested against fixture markup without a network.
fn parse_quote_page(html: &str) -> Result<Quote, FetchError> {
    let document = Html::parse_document(html);

    let price_selector =
        Selector::parse(PRICE_SELECTOR).map_err(|e| FetchError::Parse(e.to_string()))?;
    let change_selector =
        Selector::parse(CHANGE_PCT_SELECTOR).map_err(|e| FetchError::Parse(e.to_string()))?;

    let price_text = document
        .select(&price_selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(|| FetchError::Parse("price element not found".to_string()))?;

    let price = parse_price(&price_text)?;
    if price <= 0.0 {
        return Err(FetchError::Parse(format!("no usable price: {price_text:?}")));
    }

    // Percent change is nice to have; a missing or odd element degrades
    // to 0 rather than failing the whole quote.
    let change_pct = document
        .select(&change_selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .map(|raw| parse_change_pct(&raw))
        .unwrap_or(0.0);

    Ok(Quote::from_price(price, change_pct))
}

/// Parse a rendered price like `"Rp7,200.00"` into a float.
fn parse_price(raw: &str) -> Result<f64, FetchError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| FetchError::Parse(format!("unparseable price: {raw:?}")))
}

/// Parse a rendered percent like `"+1.25%"` or `"1.25%"`.
fn parse_change_pct(raw: &str) -> f64 {
    raw.trim()
        .trim_end_matches('%')
        .trim_start_matches('+')
        .parse::<f64>()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html><body>
          <div class="main">
            <div class="YMlKec fxKbKc">Rp9,250.00</div>
            <div class="JwB6zf">+1.65%</div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_quote_page() {
        let quote = parse_quote_page(FIXTURE).unwrap();
        assert!((quote.price - 9250.0).abs() < 1e-9);
        assert!((quote.change_pct - 1.65).abs() < 1e-9);
    }

    #[test]
    fn test_parse_quote_page_negative_change() {
        let html = r#"<div class="YMlKec fxKbKc">512.00</div><div class="JwB6zf">-2.10%</div>"#;
        let quote = parse_quote_page(html).unwrap();
        assert!((quote.price - 512.0).abs() < 1e-9);
        assert!((quote.change_pct + 2.10).abs() < 1e-9);
    }

    #[test]
    fn test_parse_quote_page_missing_price_fails() {
        let html = r#"<div class="other">nothing here</div>"#;
        let err = parse_quote_page(html).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_parse_quote_page_missing_change_defaults_to_zero() {
        let html = r#"<div class="YMlKec fxKbKc">100.00</div>"#;
        let quote = parse_quote_page(html).unwrap();
        assert_eq!(quote.change_pct, 0.0);
    }

    #[test]
    fn test_zero_price_is_rejected() {
        // A rendered zero is treated as "no data", never a valid price.
        let html = r#"<div class="YMlKec fxKbKc">0.00</div><div class="JwB6zf">0.00%</div>"#;
        assert!(parse_quote_page(html).is_err());
    }

    #[test]
    fn test_parse_price_strips_currency_noise() {
        assert!((parse_price("Rp 7,200.50").unwrap() - 7200.50).abs() < 1e-9);
        assert!(parse_price("N/A").is_err());
    }

    #[test]
    fn test_parse_change_pct_variants() {
        assert!((parse_change_pct("+1.25%") - 1.25).abs() < 1e-9);
        assert!((parse_change_pct("-0.80%") + 0.80).abs() < 1e-9);
        assert_eq!(parse_change_pct("—"), 0.0);
    }
}
