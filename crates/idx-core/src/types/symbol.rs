//! Canonical ticker symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange suffix for Jakarta-listed equities.
pub const JK_SUFFIX: &str = ".JK";

/// A normalized IDX ticker in canonical `<CODE>.JK` form.
///
/// Every lookup path normalizes user input through [`Symbol::parse`] so a
/// logical instrument has exactly one canonical form; `bbca`, ` BBCA ` and
/// `BBCA.JK` all map to `BBCA.JK`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Normalize arbitrary user input into a canonical symbol.
    pub fn parse(input: &str) -> Self {
        let code = input
            .trim()
            .to_uppercase()
            .trim_end_matches(JK_SUFFIX)
            .to_string();
        Self(format!("{code}{JK_SUFFIX}"))
    }

    /// The bare ticker code without the exchange suffix.
    pub fn code(&self) -> &str {
        self.0.trim_end_matches(JK_SUFFIX)
    }

    /// The canonical `<CODE>.JK` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The Google Finance quote path segment (`<CODE>:IDX`).
    pub fn google_id(&self) -> String {
        format!("{}:IDX", self.code())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
