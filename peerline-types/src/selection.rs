//! The user's symbol selection and its shareable query-parameter form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::PeerlineError;
use crate::symbol::Symbol;

/// Query-parameter key under which a selection is shared.
pub const SELECTION_QUERY_KEY: &str = "stocks";

/// Ordered, duplicate-free list of selected symbols.
///
/// Shared as a single query parameter: `stocks=ITSA4.SA,VALE3.SA`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSelection")]
pub struct SymbolSelection {
    symbols: Vec<Symbol>,
}

/// Wire shape of [`SymbolSelection`], checked before it becomes one.
#[derive(Deserialize)]
struct RawSelection {
    symbols: Vec<Symbol>,
}

impl TryFrom<RawSelection> for SymbolSelection {
    type Error = PeerlineError;

    fn try_from(raw: RawSelection) -> Result<Self, Self::Error> {
        let len = raw.symbols.len();
        let selection = Self::new(raw.symbols);
        if selection.len() != len {
            return Err(PeerlineError::invalid_input(
                "selection lists a symbol more than once",
            ));
        }
        Ok(selection)
    }
}

impl SymbolSelection {
    /// Build a selection, keeping the first occurrence of each symbol.
    pub fn new<I: IntoIterator<Item = Symbol>>(symbols: I) -> Self {
        let mut out: Vec<Symbol> = Vec::new();
        for s in symbols {
            if !out.contains(&s) {
                out.push(s);
            }
        }
        Self { symbols: out }
    }

    /// Parse a comma-joined parameter value.
    ///
    /// Entries are trimmed and upper-cased; empty entries are skipped.
    ///
    /// # Errors
    /// Returns `InvalidInput` if an entry is not a valid symbol.
    pub fn parse_query_value(value: &str) -> Result<Self, PeerlineError> {
        let symbols = value
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Symbol::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(symbols))
    }

    /// Resolve a selection from query pairs, falling back to `default`.
    ///
    /// The last `stocks` pair wins when the key repeats.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the parameter holds an invalid symbol.
    pub fn from_query<'a, I>(pairs: I, default: &[Symbol]) -> Result<Self, PeerlineError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        match pairs
            .into_iter()
            .filter(|(k, _)| *k == SELECTION_QUERY_KEY)
            .last()
        {
            Some((_, v)) => Self::parse_query_value(v),
            None => Ok(Self::new(default.iter().cloned())),
        }
    }

    /// Parameter value, or `None` when the selection is empty and the
    /// parameter should be removed.
    #[must_use]
    pub fn to_query_value(&self) -> Option<String> {
        if self.symbols.is_empty() {
            return None;
        }
        let parts: Vec<&str> = self.symbols.iter().map(Symbol::as_str).collect();
        Some(parts.join(","))
    }

    /// `(key, value)` pair for the shareable URL, if any.
    #[must_use]
    pub fn to_query_pair(&self) -> Option<(&'static str, String)> {
        self.to_query_value().map(|v| (SELECTION_QUERY_KEY, v))
    }

    /// Picker options: the sorted union of `catalog` and the selection.
    #[must_use]
    pub fn options(&self, catalog: &[Symbol]) -> Vec<Symbol> {
        let set: BTreeSet<&Symbol> = catalog.iter().chain(self.symbols.iter()).collect();
        set.into_iter().cloned().collect()
    }

    /// Selected symbols in order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of selected symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<Symbol> for SymbolSelection {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self::new(iter)
    }
}
