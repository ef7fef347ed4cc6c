//! Combined indicator report for a single symbol.

use crate::{Macd, MacdOutput, Rsi, Sma};
use idx_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

/// Number of trailing closes shown as the short-term trend.
const TREND_LEN: usize = 5;

/// The derived indicator set for one analysis request.
///
/// Recomputed per request from a fresh close series; nothing here is
/// persisted. Sentinel zeros from the underlying indicators flow through
/// unchanged, so consumers should call [`IndicatorReport::has_rsi`] and
/// friends before rendering values as meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorReport {
    /// RSI(14); 0.0 when the series was too short
    pub rsi: f64,
    /// SMA(20); 0.0 when the series was too short
    pub sma20: f64,
    /// MACD(12, 26, 9); all-zero when the series was too short
    pub macd: MacdOutput,
    /// Last few closes, oldest first
    pub trend: Vec<f64>,
    /// How many closes the report was computed from
    pub samples: usize,
}

impl IndicatorReport {
    /// Compute the full report from a daily close series (oldest first).
    pub fn compute(closes: &[f64]) -> Self {
        let rsi = Rsi::default();
        let sma20 = Sma::new(20);
        let macd = Macd::default();

        let trend_start = closes.len().saturating_sub(TREND_LEN);

        Self {
            rsi: rsi.latest(closes),
            sma20: sma20.latest(closes),
            macd: MultiOutputIndicator::latest(&macd, closes),
            trend: closes[trend_start..].to_vec(),
            samples: closes.len(),
        }
    }

    /// Whether the series was long enough for a meaningful RSI.
    pub fn has_rsi(&self) -> bool {
        self.samples >= Rsi::default().min_len()
    }

    /// Whether the series was long enough for a meaningful SMA(20).
    pub fn has_sma20(&self) -> bool {
        self.samples >= 20
    }

    /// Whether the series was long enough for a meaningful MACD.
    pub fn has_macd(&self) -> bool {
        self.samples >= Macd::default().min_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_trend_is_last_five() {
        let closes: Vec<f64> = (1..=40).map(|i| i as f64).collect();
        let report = IndicatorReport::compute(&closes);
        assert_eq!(report.trend, vec![36.0, 37.0, 38.0, 39.0, 40.0]);
        assert_eq!(report.samples, 40);
    }

    #[test]
    fn test_report_flags_on_short_series() {
        let closes = vec![100.0; 10];
        let report = IndicatorReport::compute(&closes);
        assert!(!report.has_rsi());
        assert!(!report.has_sma20());
        assert!(!report.has_macd());
        assert_eq!(report.rsi, 0.0);
        assert_eq!(report.sma20, 0.0);
        assert_eq!(report.macd, MacdOutput::default());
    }

    #[test]
    fn test_report_flags_on_full_series() {
        let closes: Vec<f64> = (0..45).map(|i| 100.0 + i as f64).collect();
        let report = IndicatorReport::compute(&closes);
        assert!(report.has_rsi());
        assert!(report.has_sma20());
        assert!(report.has_macd());
    }

    #[test]
    fn test_report_short_trend() {
        let report = IndicatorReport::compute(&[1.0, 2.0]);
        assert_eq!(report.trend, vec![1.0, 2.0]);
    }
}
