//! Batched multi-symbol scanning.
//!
//! The engine behind `/trending`, `/topgainers`, `/losers`, `/bpjs` and
//! `/bsjp`: resolve quotes for a whole universe under a concurrency and
//! rate budget, keep whatever succeeded, and layer pure ranking policies
//! on top.

pub mod rank;
mod scan;
mod universe;

pub use scan::{BatchScanner, ScanBudget};
pub use universe::Universe;
