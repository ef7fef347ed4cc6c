//! Ranking and filtering policies over scan results.
//!
//! Each policy is a pure function of the scanned quotes plus numeric
//! thresholds: no hidden state, fully unit-testable with synthetic lists.

use idx_core::types::ResolvedQuote;

/// Number of picks the momentum/oversold policies return.
const PICK_COUNT: usize = 5;

/// Top movers: percent change above `min_change_pct`, best first.
pub fn top_movers(quotes: &[ResolvedQuote], min_change_pct: f64, n: usize) -> Vec<ResolvedQuote> {
    let mut picks: Vec<ResolvedQuote> = quotes
        .iter()
        .filter(|q| q.change_pct() > min_change_pct)
        .cloned()
        .collect();
    picks.sort_by(|a, b| b.change_pct().total_cmp(&a.change_pct()));
    picks.truncate(n);
    picks
}

/// Top losers: negative percent change, worst (most negative) first.
pub fn top_losers(quotes: &[ResolvedQuote], n: usize) -> Vec<ResolvedQuote> {
    let mut picks: Vec<ResolvedQuote> = quotes
        .iter()
        .filter(|q| q.change_pct() < 0.0)
        .cloned()
        .collect();
    picks.sort_by(|a, b| a.change_pct().total_cmp(&b.change_pct()));
    picks.truncate(n);
    picks
}

/// Momentum candidates (BPJS, buy-morning-sell-afternoon): gainers inside
/// the `low..high` sweet spot, strongest first, top 5.
///
/// The band excludes both flat names and spikes already too extended to
/// chase.
pub fn momentum_candidates(quotes: &[ResolvedQuote], low: f64, high: f64) -> Vec<ResolvedQuote> {
    let mut picks: Vec<ResolvedQuote> = quotes
        .iter()
        .filter(|q| q.change_pct() > low && q.change_pct() < high)
        .cloned()
        .collect();
    picks.sort_by(|a, b| b.change_pct().total_cmp(&a.change_pct()));
    picks.truncate(PICK_COUNT);
    picks
}

/// Oversold candidates (BSJP, buy-afternoon-sell-morning): losers above
/// the `floor` (not too deep), deepest first, top 5.
pub fn oversold_candidates(quotes: &[ResolvedQuote], floor: f64) -> Vec<ResolvedQuote> {
    let mut picks: Vec<ResolvedQuote> = quotes
        .iter()
        .filter(|q| q.change_pct() < 0.0 && q.change_pct() > floor)
        .cloned()
        .collect();
    picks.sort_by(|a, b| a.change_pct().total_cmp(&b.change_pct()));
    picks.truncate(PICK_COUNT);
    picks
}

/// Volatility alerts: absolute percent change above `min_abs_pct`, largest
/// swing first.
pub fn volatility_alerts(
    quotes: &[ResolvedQuote],
    min_abs_pct: f64,
    n: usize,
) -> Vec<ResolvedQuote> {
    let mut picks: Vec<ResolvedQuote> = quotes
        .iter()
        .filter(|q| q.change_pct().abs() > min_abs_pct)
        .cloned()
        .collect();
    picks.sort_by(|a, b| b.change_pct().abs().total_cmp(&a.change_pct().abs()));
    picks.truncate(n);
    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use idx_core::types::{Quote, QuoteOrigin, Symbol};

    fn quote(code: &str, change_pct: f64) -> ResolvedQuote {
        ResolvedQuote {
            symbol: Symbol::parse(code),
            quote: Quote::from_price(1000.0, change_pct),
            origin: QuoteOrigin::Live,
        }
    }

    fn codes(quotes: &[ResolvedQuote]) -> Vec<&str> {
        quotes.iter().map(|q| q.symbol.code()).collect()
    }

    #[test]
    fn test_top_movers_order_and_threshold() {
        let quotes = vec![quote("A", 5.0), quote("B", -3.0), quote("C", 8.0)];
        let picks = top_movers(&quotes, 0.0, 10);
        assert_eq!(codes(&picks), vec!["C", "A"]);
    }

    #[test]
    fn test_top_movers_respects_n() {
        let quotes = vec![quote("A", 5.0), quote("B", 6.0), quote("C", 8.0)];
        let picks = top_movers(&quotes, 0.0, 2);
        assert_eq!(codes(&picks), vec!["C", "B"]);
    }

    #[test]
    fn test_top_losers_worst_first() {
        let quotes = vec![quote("A", 5.0), quote("B", -3.0), quote("C", 8.0)];
        let picks = top_losers(&quotes, 10);
        assert_eq!(codes(&picks), vec!["B"]);

        let quotes = vec![quote("A", -1.0), quote("B", -6.0), quote("C", -4.0)];
        let picks = top_losers(&quotes, 2);
        assert_eq!(codes(&picks), vec!["B", "C"]);
    }

    #[test]
    fn test_momentum_band_is_exclusive() {
        let quotes = vec![
            quote("FLAT", 1.5),   // on the low bound, excluded
            quote("OK", 2.0),
            quote("HOT", 9.9),
            quote("SPIKE", 10.0), // on the high bound, excluded
        ];
        let picks = momentum_candidates(&quotes, 1.5, 10.0);
        assert_eq!(codes(&picks), vec!["HOT", "OK"]);
    }

    #[test]
    fn test_momentum_takes_top_five() {
        let quotes: Vec<ResolvedQuote> = (1..=8)
            .map(|i| quote(&format!("S{i}"), 2.0 + i as f64 * 0.5))
            .collect();
        let picks = momentum_candidates(&quotes, 1.5, 10.0);
        assert_eq!(picks.len(), 5);
        assert_eq!(picks[0].symbol.code(), "S8");
    }

    #[test]
    fn test_oversold_band_and_order() {
        let quotes = vec![
            quote("GREEN", 2.0),   // not a loser
            quote("LIGHT", -1.0),
            quote("DEEP", -7.5),
            quote("CRASH", -9.0),  // below the floor, excluded
        ];
        let picks = oversold_candidates(&quotes, -8.0);
        assert_eq!(codes(&picks), vec!["DEEP", "LIGHT"]);
    }

    #[test]
    fn test_volatility_alerts_use_absolute_change() {
        let quotes = vec![
            quote("UP", 5.0),
            quote("DOWN", -6.0),
            quote("QUIET", 1.0),
        ];
        let picks = volatility_alerts(&quotes, 4.0, 8);
        assert_eq!(codes(&picks), vec!["DOWN", "UP"]);
    }

    #[test]
    fn test_policies_on_empty_input() {
        let quotes: Vec<ResolvedQuote> = vec![];
        assert!(top_movers(&quotes, 0.0, 10).is_empty());
        assert!(top_losers(&quotes, 10).is_empty());
        assert!(momentum_candidates(&quotes, 1.5, 10.0).is_empty());
        assert!(oversold_candidates(&quotes, -8.0).is_empty());
        assert!(volatility_alerts(&quotes, 4.0, 8).is_empty());
    }
}
