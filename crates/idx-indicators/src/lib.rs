//! Technical indicators for signal analysis.
//!
//! This crate provides the indicator engine behind `/analisis`:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//!
//! All indicators are pure functions over a daily close series (oldest
//! first). Series shorter than an indicator's minimum yield a sentinel
//! zero output, which callers must distinguish from a genuine reading.

pub mod momentum;
pub mod moving_average;
pub mod report;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use report::IndicatorReport;
