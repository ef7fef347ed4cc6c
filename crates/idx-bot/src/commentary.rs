//! LLM commentary for deep analysis.
//!
//! Calls an OpenAI-compatible chat-completions endpoint (Groq by
//! default) to turn an indicator report into a short opinionated blurb.
//! Commentary is strictly best-effort: no key, a slow upstream, or a
//! malformed reply all fall back to a rule-based technical summary so
//! `/analisis` always answers.

use idx_core::types::ResolvedQuote;
use idx_indicators::IndicatorReport;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Debug, Deserialize)]
struct ChatMessageBody {
    content: String,
}

/// Best-effort analysis commentary client.
pub struct CommentaryClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl CommentaryClient {
    /// `api_key: None` disables the upstream call entirely; every request
    /// then gets the rule-based fallback.
    pub fn new(api_key: Option<String>, model: String, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            model,
            max_tokens,
        }
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }

    /// Produce commentary for an analysis; never fails.
    pub async fn commentary(&self, quote: &ResolvedQuote, report: &IndicatorReport) -> String {
        let Some(key) = &self.api_key else {
            debug!("no commentary api key, using technical fallback");
            return technical_summary(quote, report);
        };

        match self.ask(key, &build_prompt(quote, report)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "commentary request failed, using technical fallback");
                technical_summary(quote, report)
            }
        }
    }

    async fn ask(&self, key: &str, prompt: &str) -> Result<String, String> {
        let body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "Kamu analis saham IDX yang santai tapi tajam. \
                                Jawab singkat dalam bahasa Indonesia, maksimal 4 kalimat, \
                                tanpa format markdown. Selalu tutup dengan pengingat DYOR."
                },
                {"role": "user", "content": prompt}
            ],
            "max_tokens": self.max_tokens,
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("upstream status {}", response.status()));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| e.to_string())?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| "empty completion".to_string())
    }
}

/// Render the indicator state as a prompt for the model.
fn build_prompt(quote: &ResolvedQuote, report: &IndicatorReport) -> String {
    let trend: Vec<String> = report.trend.iter().map(|c| format!("{c:.0}")).collect();
    format!(
        "Analisa singkat saham {}: harga {:.0}, perubahan {:+.2}%. \
         RSI(14) {:.1}, SMA20 {:.0}, MACD {:.2} / signal {:.2}. \
         Close 5 hari terakhir: {}.",
        quote.symbol.code(),
        quote.quote.price,
        quote.change_pct(),
        report.rsi,
        report.sma20,
        report.macd.macd,
        report.macd.signal,
        trend.join(", "),
    )
}

/// Rule-based summary used when no LLM answer is available.
fn technical_summary(quote: &ResolvedQuote, report: &IndicatorReport) -> String {
    let mut parts: Vec<String> = Vec::new();

    if report.has_rsi() {
        if report.rsi > 70.0 {
            parts.push(format!("RSI {:.0} sudah overbought, rawan koreksi", report.rsi));
        } else if report.rsi < 30.0 {
            parts.push(format!("RSI {:.0} oversold, potensi technical rebound", report.rsi));
        } else {
            parts.push(format!("RSI {:.0} masih netral", report.rsi));
        }
    } else {
        parts.push("Data historis belum cukup untuk RSI".to_string());
    }

    if report.has_sma20() {
        if quote.quote.price > report.sma20 {
            parts.push("harga di atas SMA20 (uptrend jangka pendek)".to_string());
        } else {
            parts.push("harga di bawah SMA20 (tekanan jual)".to_string());
        }
    }

    if report.has_macd() {
        if report.macd.histogram > 0.0 {
            parts.push("MACD histogram positif".to_string());
        } else {
            parts.push("MACD histogram negatif".to_string());
        }
    }

    format!("{}. DYOR!", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use idx_core::types::{Quote, QuoteOrigin, Symbol};

    fn fixture(price: f64, change_pct: f64, closes: &[f64]) -> (ResolvedQuote, IndicatorReport) {
        let quote = ResolvedQuote {
            symbol: Symbol::parse("BBCA"),
            quote: Quote::from_price(price, change_pct),
            origin: QuoteOrigin::Live,
        };
        (quote, IndicatorReport::compute(closes))
    }

    #[test]
    fn test_prompt_names_the_symbol_and_numbers() {
        let closes: Vec<f64> = (0..45).map(|i| 9000.0 + i as f64 * 10.0).collect();
        let (quote, report) = fixture(9440.0, 1.25, &closes);

        let prompt = build_prompt(&quote, &report);
        assert!(prompt.contains("BBCA"));
        assert!(prompt.contains("9440"));
        assert!(prompt.contains("+1.25%"));
    }

    #[test]
    fn test_fallback_mentions_short_history() {
        let (quote, report) = fixture(9000.0, 0.5, &[9000.0; 5]);
        let summary = technical_summary(&quote, &report);
        assert!(summary.contains("belum cukup"));
        assert!(summary.ends_with("DYOR!"));
    }

    #[test]
    fn test_fallback_flags_uptrend() {
        // Rising series keeps price above SMA20 and RSI pinned high.
        let closes: Vec<f64> = (0..45).map(|i| 9000.0 + i as f64 * 20.0).collect();
        let (quote, report) = fixture(9900.0, 2.0, &closes);

        let summary = technical_summary(&quote, &report);
        assert!(summary.contains("overbought"));
        assert!(summary.contains("di atas SMA20"));
    }

    #[tokio::test]
    async fn test_no_api_key_uses_fallback() {
        let client = CommentaryClient::new(None, "test-model".to_string(), 100);
        let (quote, report) = fixture(9000.0, 0.5, &[9000.0; 5]);
        let text = client.commentary(&quote, &report).await;
        assert!(text.ends_with("DYOR!"));
    }
}
