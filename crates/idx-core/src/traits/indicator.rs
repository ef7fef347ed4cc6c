//! Indicator trait definitions.

/// Trait for technical indicators producing a single latest value.
///
/// Indicators are pure and deterministic over a close-price series
/// (oldest first). When the series is shorter than [`Indicator::min_len`]
/// they return a defined sentinel (zero for the numeric indicators) rather
/// than an error; callers must treat the sentinel as "insufficient data",
/// not as a genuine reading.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Compute the indicator value at the end of the series.
    fn latest(&self, closes: &[f64]) -> Self::Output;

    /// Minimum number of data points for a meaningful (non-sentinel) value.
    fn min_len(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Whether the series is long enough for a meaningful value.
    fn is_ready(&self, closes: &[f64]) -> bool {
        closes.len() >= self.min_len()
    }
}

/// Multi-output indicator (e.g. MACD line, signal, and histogram).
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple related values.
    type Outputs;

    /// Compute the indicator values at the end of the series.
    fn latest(&self, closes: &[f64]) -> Self::Outputs;

    /// Minimum number of data points for a meaningful (non-sentinel) value.
    fn min_len(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LastValue;

    impl Indicator for LastValue {
        type Output = f64;

        fn latest(&self, closes: &[f64]) -> f64 {
            closes.last().copied().unwrap_or(0.0)
        }

        fn min_len(&self) -> usize {
            1
        }

        fn name(&self) -> &str {
            "last"
        }
    }

    #[test]
    fn test_readiness() {
        let indicator = LastValue;
        assert!(!indicator.is_ready(&[]));
        assert!(indicator.is_ready(&[1.0]));
        assert!((indicator.latest(&[1.0, 2.0]) - 2.0).abs() < 1e-12);
    }
}
