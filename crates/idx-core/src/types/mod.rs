//! Core data types.

mod quote;
mod symbol;

pub use quote::{CacheEntry, Quote, QuoteOrigin, ResolvedQuote};
pub use symbol::Symbol;
