//! Moving average indicators.

use idx_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the last N closes. Returns the sentinel `0.0` when
/// fewer than N points are available.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn latest(&self, closes: &[f64]) -> f64 {
        if closes.len() < self.period {
            return 0.0;
        }
        let tail = &closes[closes.len() - self.period..];
        tail.iter().sum::<f64>() / self.period as f64
    }

    fn min_len(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Recursive exponential average seeded with the first element of the
/// series, smoothing constant `k = 2 / (period + 1)`. Seeding with the
/// first element (rather than an initial SMA) matters for MACD numeric
/// correctness: the MACD line is the pointwise difference of two EMA
/// arrays computed this way over the entire input.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    /// Compute the full EMA array over the series.
    ///
    /// `result[i]` is the EMA after observing `closes[..=i]`. Empty input
    /// yields an empty array.
    pub fn series(&self, closes: &[f64]) -> Vec<f64> {
        let Some(&first) = closes.first() else {
            return vec![];
        };

        let mut result = Vec::with_capacity(closes.len());
        let mut ema = first;
        result.push(ema);

        let one_minus_mult = 1.0 - self.multiplier;
        for &price in &closes[1..] {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn latest(&self, closes: &[f64]) -> f64 {
        self.series(closes).last().copied().unwrap_or(0.0)
    }

    fn min_len(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
