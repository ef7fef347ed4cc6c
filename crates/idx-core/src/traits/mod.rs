//! Core trait definitions.

mod history;
mod indicator;
mod quote_source;

pub use history::HistorySource;
pub use indicator::{Indicator, MultiOutputIndicator};
pub use quote_source::QuoteSource;
