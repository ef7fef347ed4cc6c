//! Momentum indicators.

use crate::moving_average::Ema;
use idx_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes to evaluate
/// overbought or oversold conditions. Classic Wilder smoothing: seed the
/// average gain/loss over the first `period` deltas, then exponentially
/// smooth with weight `1/period` over the remainder.
///
/// Returns the sentinel `0.0` when fewer than `period + 1` closes are
/// available — callers must not read that as a real oversold signal.
/// When the average loss is exactly zero the output is `100.0`, which
/// makes a flat series indistinguishable from a strictly rising one; this
/// is a known edge of the `avg_loss == 0 => 100` rule, kept as-is.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn latest(&self, closes: &[f64]) -> f64 {
        if closes.len() < self.period + 1 {
            return 0.0;
        }

        let period_f64 = self.period as f64;

        // Seed averages over the first `period` deltas
        let mut gains = 0.0;
        let mut losses = 0.0;
        for i in 1..=self.period {
            let change = closes[i] - closes[i - 1];
            if change > 0.0 {
                gains += change;
            } else {
                losses += -change;
            }
        }
        let mut avg_gain = gains / period_f64;
        let mut avg_loss = losses / period_f64;

        // Wilder smoothing over the remainder
        for i in (self.period + 1)..closes.len() {
            let change = closes[i] - closes[i - 1];
            let gain = if change > 0.0 { change } else { 0.0 };
            let loss = if change < 0.0 { -change } else { 0.0 };
            avg_gain = (avg_gain * (period_f64 - 1.0) + gain) / period_f64;
            avg_loss = (avg_loss * (period_f64 - 1.0) + loss) / period_f64;
        }

        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        }
    }

    fn min_len(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA) at the final index
    pub macd: f64,
    /// Signal line (EMA of the MACD line) at the final index
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Computes EMA(fast) and EMA(slow) arrays over the entire input series —
/// not independently truncated windows, which would diverge numerically —
/// takes their pointwise difference as the MACD line, and smooths the MACD
/// line's trailing `slow_period` values with EMA(signal) for the signal
/// line. Returns the all-zero sentinel for series shorter than
/// `slow_period`.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn latest(&self, closes: &[f64]) -> MacdOutput {
        if closes.len() < self.slow_period {
            return MacdOutput::default();
        }

        let fast_ema = Ema::new(self.fast_period).series(closes);
        let slow_ema = Ema::new(self.slow_period).series(closes);

        // Full-series EMAs have identical lengths, so the difference is
        // aligned without any offset bookkeeping.
        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let tail_start = macd_line.len().saturating_sub(self.slow_period);
        let signal_line = Ema::new(self.signal_period).series(&macd_line[tail_start..]);

        let macd = macd_line.last().copied().unwrap_or(0.0);
        let signal = signal_line.last().copied().unwrap_or(0.0);

        MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        }
    }

    fn min_len(&self) -> usize {
        self.slow_period
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
