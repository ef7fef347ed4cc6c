//! MarkdownV2 message formatting.
//!
//! Pure string builders so every user-visible surface is unit-testable.
//! All dynamic text must pass through [`escape_markdown`]; Telegram
//! rejects the whole message on a single unescaped reserved character.

use chrono::{DateTime, Utc};
use idx_core::types::{QuoteOrigin, ResolvedQuote};
use idx_indicators::IndicatorReport;

/// Characters MarkdownV2 requires escaping.
const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Escape text for MarkdownV2.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Linked bold ticker pointing at its Stockbit page.
fn ticker_link(quote: &ResolvedQuote) -> String {
    let code = quote.symbol.code();
    format!(
        "*[{}](https://stockbit.com/symbol/{})*",
        escape_markdown(quote.symbol.as_str()),
        code
    )
}

/// Signed, escaped percent like `+1.25` or `\-0.80`.
fn signed_pct(change_pct: f64) -> String {
    if change_pct > 0.0 {
        format!("\\+{}", escape_markdown(&format!("{change_pct:.2}")))
    } else {
        escape_markdown(&format!("{change_pct:.2}"))
    }
}

fn direction_icon(change_pct: f64) -> &'static str {
    if change_pct > 0.0 {
        "🚀"
    } else if change_pct < 0.0 {
        "🔻"
    } else {
        "➖"
    }
}

fn fmt_price(price: f64) -> String {
    // IDX prices are whole rupiah; fractional ticks only show when present.
    if price.fract() == 0.0 {
        format!("{price:.0}")
    } else {
        format!("{price:.2}")
    }
}

/// HH:MM of a cache observation, for staleness labels.
fn fmt_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

/// The `/start` help text.
pub fn help_text(universe_size: usize) -> String {
    format!(
        "*IDX SIGNAL BOT* 📈\n\n\
         *Commands:*\n\
         ➤ /price \\<kode\\> \\- cek harga cepat\n\
         ➤ /analisis \\<kode\\> \\- analisa teknikal \\+ AI\n\
         ➤ /trending \\- scan {} saham likuid\n\
         ➤ /topgainers \\- top gainers\n\
         ➤ /losers \\- top losers\n\
         ➤ /bpjs \\- momentum picks\n\
         ➤ /bsjp \\- oversold picks\n\
         ➤ /watchlist \\- pantauan pribadi\n\
         ➤ /subscribe \\- alert otomatis\n\n\
         _DYOR\\!_",
        escape_markdown(&universe_size.to_string())
    )
}

/// Single-line price answer for `/price`.
pub fn price_message(quote: &ResolvedQuote) -> String {
    let mut text = format!(
        "💰 {}: {} {} {}%",
        ticker_link(quote),
        escape_markdown(&fmt_price(quote.quote.price)),
        direction_icon(quote.change_pct()),
        signed_pct(quote.change_pct()),
    );
    if let QuoteOrigin::Cached { observed_at } = quote.origin {
        text.push_str(&format!(
            "\n_\\(cached {}\\)_ ❄️",
            escape_markdown(&fmt_time(observed_at))
        ));
    }
    text
}

/// "Data unavailable" answer for single-symbol commands.
pub fn unavailable_message(input: &str) -> String {
    format!(
        "❌ Data tidak tersedia untuk *{}*\\. Bursa tutup atau kode salah\\?",
        escape_markdown(&input.to_uppercase())
    )
}

/// Technical section plus commentary for `/analisis`.
pub fn analysis_message(
    quote: &ResolvedQuote,
    report: &IndicatorReport,
    commentary: &str,
) -> String {
    let rsi_label = if !report.has_rsi() {
        "_\\(data kurang\\)_"
    } else if report.rsi > 70.0 {
        "_\\(Overbought⚠️\\)_"
    } else if report.rsi < 30.0 {
        "_\\(Oversold✅\\)_"
    } else {
        "_\\(Neutral\\)_"
    };

    let sma20 = if report.has_sma20() {
        escape_markdown(&fmt_price(report.sma20))
    } else {
        "n/a".to_string()
    };
    let macd_line = if report.has_macd() {
        format!(
            "{} \\(Sig: {}\\)",
            escape_markdown(&format!("{:.2}", report.macd.macd)),
            escape_markdown(&format!("{:.2}", report.macd.signal))
        )
    } else {
        "n/a".to_string()
    };

    let mut text = format!(
        "📊 {}\n\n\
         💰 {} {} {}%\n\n\
         ⚙️ *TEKNIKAL*\n\
         • RSI: {} {}\n\
         • SMA20: {}\n\
         • MACD: {}\n",
        ticker_link(quote),
        escape_markdown(&fmt_price(quote.quote.price)),
        direction_icon(quote.change_pct()),
        signed_pct(quote.change_pct()),
        escape_markdown(&format!("{:.2}", report.rsi)),
        rsi_label,
        sma20,
        macd_line,
    );

    if let QuoteOrigin::Cached { observed_at } = quote.origin {
        text.push_str(&format!(
            "\n_Harga dari cache {}_ ❄️\n",
            escape_markdown(&fmt_time(observed_at))
        ));
    }

    text.push_str(&format!("\n🤖 *AI*\n{}\n", escape_markdown(commentary)));
    text
}

/// Ranked list for `/trending`.
pub fn trending_message(picks: &[ResolvedQuote], scanned: usize) -> String {
    if picks.is_empty() {
        return format!(
            "😴 *Market sepi*\\.\\.\\. scanned {}\\. Chill\\! ☕",
            escape_markdown(&scanned.to_string())
        );
    }

    let mut text = format!(
        "🔥 *TOP {} TRENDING* 🔥\n\n",
        escape_markdown(&picks.len().to_string())
    );
    for (i, pick) in picks.iter().enumerate() {
        let icon = if i < 3 { "🚀" } else { "⚡" };
        text.push_str(&format!(
            "{} {}: {}%\n",
            icon,
            ticker_link(pick),
            signed_pct(pick.change_pct())
        ));
    }
    text.push_str(&format!(
        "\n_Scanned {} stocks_ 💰",
        escape_markdown(&scanned.to_string())
    ));
    text
}

/// Ranked list for `/topgainers`.
pub fn gainers_message(picks: &[ResolvedQuote]) -> String {
    if picks.is_empty() {
        return "😴 *Belum ada yang hijau hari ini*".to_string();
    }

    let mut text = "🏆 *TOP GAINERS* 🌙\n\n".to_string();
    for (i, pick) in picks.iter().enumerate() {
        let medal = ["🥇", "🥈", "🥉"].get(i).copied().unwrap_or("🔸");
        text.push_str(&format!(
            "{} {}: {}%\n",
            medal,
            ticker_link(pick),
            signed_pct(pick.change_pct())
        ));
    }
    text.push_str("\n_/analisis untuk deep dive_ 💎");
    text
}

/// Ranked list for `/losers`.
pub fn losers_message(picks: &[ResolvedQuote]) -> String {
    if picks.is_empty() {
        return "🟢 *Semua saham hijau\\!*".to_string();
    }

    let mut text =
        "🔻 *TOP LOSERS* 🎯\n_Potential reversal plays_\n\n".to_string();
    for (i, pick) in picks.iter().enumerate() {
        let medal = ["💀", "🩸", "🔻"].get(i).copied().unwrap_or("⬇️");
        text.push_str(&format!(
            "{} {}: {}%\n",
            medal,
            ticker_link(pick),
            signed_pct(pick.change_pct())
        ));
    }
    text.push_str("\n_Oversold\\? Cek /analisis \\<kode\\>_ 🔧");
    text
}

/// Picks for `/bpjs` (momentum) and `/bsjp` (oversold).
pub fn picks_message(
    title: &str,
    subtitle: &str,
    picks: &[ResolvedQuote],
    scanned: usize,
    empty_hint: &str,
) -> String {
    if picks.is_empty() {
        return format!("😴 *Tidak ada kandidat*\n\n_{empty_hint}_");
    }

    let mut text = format!(
        "{} *TOP {} PICKS*\n_{}_\n\n",
        title,
        escape_markdown(&picks.len().to_string()),
        subtitle
    );
    for (i, pick) in picks.iter().enumerate() {
        let icon = ["🥇", "🥈", "🥉", "4️⃣", "5️⃣"].get(i).copied().unwrap_or("•");
        text.push_str(&format!(
            "{} {}\n   Harga: {} \\({}%\\)\n",
            icon,
            ticker_link(pick),
            escape_markdown(&fmt_price(pick.quote.price)),
            signed_pct(pick.change_pct())
        ));
    }
    text.push_str(&format!(
        "\n_Scanned {} stocks\\. /analisis \\<kode\\> untuk detail_",
        escape_markdown(&scanned.to_string())
    ));
    text
}

/// Watchlist overview; partial results render per-row, failures show as
/// "no data" rather than hiding the row.
pub fn watchlist_message(rows: &[(String, Option<ResolvedQuote>)]) -> String {
    if rows.is_empty() {
        return "📋 *Watchlist kosong\\!*\n\nTambah: `/watchlist add BBCA`\nHapus: `/watchlist remove BBCA`"
            .to_string();
    }

    let mut text = "📋 *YOUR WATCHLIST* 📊\n\n".to_string();
    for (code, quote) in rows {
        match quote {
            Some(q) => {
                text.push_str(&format!(
                    "• {}: {} {} {}%\n",
                    ticker_link(q),
                    escape_markdown(&fmt_price(q.quote.price)),
                    direction_icon(q.change_pct()),
                    signed_pct(q.change_pct())
                ));
                if let QuoteOrigin::Cached { observed_at } = q.origin {
                    text.push_str(&format!(
                        "  _\\(cached {}\\)_ ❄️\n",
                        escape_markdown(&fmt_time(observed_at))
                    ));
                }
            }
            None => {
                text.push_str(&format!("💤 *{}*: no data\n", escape_markdown(code)));
            }
        }
    }
    text.push_str(&format!(
        "\n_Total: {} stocks_",
        escape_markdown(&rows.len().to_string())
    ));
    text
}

/// Broadcast body for volatility alerts.
pub fn alert_message(picks: &[ResolvedQuote]) -> String {
    let mut text = "⚠️ *VOLATILITY ALERT\\!* ⚠️\n\n".to_string();
    for pick in picks {
        let icon = if pick.change_pct() > 0.0 {
            "🟢🚀"
        } else {
            "🔴📉"
        };
        text.push_str(&format!(
            "{} {} \\({}%\\)\n",
            icon,
            ticker_link(pick),
            signed_pct(pick.change_pct())
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use idx_core::types::{Quote, Symbol};

    fn resolved(code: &str, price: f64, change_pct: f64) -> ResolvedQuote {
        ResolvedQuote {
            symbol: Symbol::parse(code),
            quote: Quote::from_price(price, change_pct),
            origin: QuoteOrigin::Live,
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("-1.25"), "\\-1\\.25");
        assert_eq!(escape_markdown("plain"), "plain");
        assert_eq!(escape_markdown("a_b*c"), "a\\_b\\*c");
    }

    #[test]
    fn test_price_message_live() {
        let text = price_message(&resolved("BBCA", 9000.0, 1.25));
        assert!(text.contains("BBCA\\.JK"));
        assert!(text.contains("9000"));
        assert!(text.contains("\\+1\\.25%"));
        assert!(!text.contains("cached"));
    }

    #[test]
    fn test_price_message_cached_shows_staleness() {
        let observed_at = DateTime::parse_from_rfc3339("2024-05-02T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut quote = resolved("BBCA", 9000.0, -0.5);
        quote.origin = QuoteOrigin::Cached { observed_at };

        let text = price_message(&quote);
        assert!(text.contains("cached 08:30"));
        assert!(text.contains("❄️"));
    }

    #[test]
    fn test_trending_message_lists_picks() {
        let picks = vec![resolved("BBCA", 9000.0, 5.0), resolved("GOTO", 60.0, 3.0)];
        let text = trending_message(&picks, 100);
        assert!(text.contains("TOP 2 TRENDING"));
        assert!(text.contains("BBCA"));
        assert!(text.contains("Scanned 100"));
    }

    #[test]
    fn test_trending_message_empty() {
        let text = trending_message(&[], 100);
        assert!(text.contains("Market sepi"));
    }

    #[test]
    fn test_losers_message_empty_is_all_green() {
        assert!(losers_message(&[]).contains("hijau"));
    }

    #[test]
    fn test_watchlist_renders_missing_rows() {
        let rows = vec![
            ("BBCA".to_string(), Some(resolved("BBCA", 9000.0, 1.0))),
            ("GHOST".to_string(), None),
        ];
        let text = watchlist_message(&rows);
        assert!(text.contains("BBCA"));
        assert!(text.contains("*GHOST*: no data"));
        assert!(text.contains("Total: 2"));
    }

    #[test]
    fn test_alert_message_direction_icons() {
        let picks = vec![resolved("UP", 100.0, 5.0), resolved("DOWN", 100.0, -6.0)];
        let text = alert_message(&picks);
        assert!(text.contains("🟢🚀"));
        assert!(text.contains("🔴📉"));
    }

    #[test]
    fn test_dynamic_text_is_escaped() {
        // A negative percent must come out escaped for MarkdownV2.
        let text = price_message(&resolved("BBCA", 9000.0, -1.25));
        assert!(text.contains("\\-1\\.25%"));
    }
}
