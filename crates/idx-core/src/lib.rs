//! Core types and traits for the IDX signal bot.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Symbol, Quote, CacheEntry, ResolvedQuote)
//! - Core traits for quote sources, history sources, and indicators
//! - The shared error taxonomy

pub mod types;
pub mod traits;
pub mod error;

pub use error::{SignalError, SignalResult};
pub use types::*;
pub use traits::*;
