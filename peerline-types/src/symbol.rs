//! Validated ticker identifiers.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PeerlineError;

/// Upper bound on symbol length; exchange tickers with suffixes stay well below it.
pub const MAX_SYMBOL_LEN: usize = 32;

/// Identifier of a tradable instrument, e.g. `ITSA4.SA` or `AAPL`.
///
/// Symbols are trimmed and upper-cased on construction. They may not be empty,
/// contain whitespace, or contain commas (commas delimit shared selections).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and canonicalize a symbol.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the symbol is empty, too long, or contains
    /// whitespace or commas.
    pub fn new(raw: &str) -> Result<Self, PeerlineError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PeerlineError::invalid_input("symbol cannot be empty"));
        }
        if let Some(bad) = trimmed.chars().find(|c| c.is_whitespace() || *c == ',') {
            return Err(PeerlineError::invalid_input(format!(
                "symbol '{trimmed}' contains forbidden character {bad:?}"
            )));
        }
        // Bound the canonical form: upper-casing can lengthen it (`ß` -> `SS`).
        let canonical = trimmed.to_uppercase();
        if canonical.chars().count() > MAX_SYMBOL_LEN {
            return Err(PeerlineError::invalid_input(format!(
                "symbol '{canonical}' exceeds {MAX_SYMBOL_LEN} characters"
            )));
        }
        Ok(Self(canonical))
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = PeerlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = PeerlineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(s: Symbol) -> Self {
        s.0
    }
}
