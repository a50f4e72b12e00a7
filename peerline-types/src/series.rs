//! Price series, provider tables, and normalized batches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PeerlineError;
use crate::symbol::Symbol;

/// One observation on a shared timestamp axis.
///
/// `value` is `None` when the source had no observation at `ts`. Non-finite
/// inputs are stored as `None` so downstream arithmetic never sees NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Observation timestamp.
    pub ts: DateTime<Utc>,
    /// Observed value, if any.
    pub value: Option<f64>,
}

impl Sample {
    /// Build a sample, treating non-finite values as absent.
    #[must_use]
    pub fn new(ts: DateTime<Utc>, value: Option<f64>) -> Self {
        Self {
            ts,
            value: value.filter(|v| v.is_finite()),
        }
    }

    /// Shorthand for a present observation.
    #[must_use]
    pub fn present(ts: DateTime<Utc>, value: f64) -> Self {
        Self::new(ts, Some(value))
    }

    /// Shorthand for an absent observation.
    #[must_use]
    pub const fn absent(ts: DateTime<Utc>) -> Self {
        Self { ts, value: None }
    }
}

/// Raw closing prices for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSeries {
    /// Instrument the prices belong to.
    pub symbol: Symbol,
    /// Ordered samples; shares its axis with every other series in the batch.
    pub samples: Vec<Sample>,
}

impl SymbolSeries {
    /// Pair a symbol with its samples.
    #[must_use]
    pub const fn new(symbol: Symbol, samples: Vec<Sample>) -> Self {
        Self { symbol, samples }
    }

    /// Build from `(timestamp, value)` pairs.
    pub fn from_pairs<I>(symbol: Symbol, pairs: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, Option<f64>)>,
    {
        let samples = pairs
            .into_iter()
            .map(|(ts, v)| Sample::new(ts, v))
            .collect();
        Self { symbol, samples }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over the timestamp axis.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.samples.iter().map(|s| s.ts)
    }
}

/// A price series rescaled so its first value is 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    /// Instrument the series belongs to.
    pub symbol: Symbol,
    /// Rescaled samples on the batch axis.
    pub samples: Vec<Sample>,
}

impl NormalizedSeries {
    /// Last present value, i.e. the cumulative return factor over the window.
    #[must_use]
    pub fn final_value(&self) -> Option<f64> {
        self.samples.iter().rev().find_map(|s| s.value)
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Normalized series for every symbol of a request, in request order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedBatch {
    series: Vec<NormalizedSeries>,
}

impl NormalizedBatch {
    /// Wrap already-normalized series.
    #[must_use]
    pub const fn new(series: Vec<NormalizedSeries>) -> Self {
        Self { series }
    }

    /// Lookup by symbol.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&NormalizedSeries> {
        self.series.iter().find(|s| &s.symbol == symbol)
    }

    /// Iterate in request order.
    pub fn iter(&self) -> impl Iterator<Item = &NormalizedSeries> {
        self.series.iter()
    }

    /// Symbols in request order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.series.iter().map(|s| &s.symbol)
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when the batch holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Consume into the underlying series.
    #[must_use]
    pub fn into_inner(self) -> Vec<NormalizedSeries> {
        self.series
    }
}

/// One provider column: the closes of a single symbol along the table index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceColumn {
    /// Column symbol.
    pub symbol: Symbol,
    /// One entry per index row.
    pub closes: Vec<Option<f64>>,
}

impl PriceColumn {
    /// True when the column has no observation at all.
    #[must_use]
    pub fn is_all_absent(&self) -> bool {
        self.closes.iter().all(Option::is_none)
    }
}

/// Table of closing prices indexed by date, one column per symbol.
///
/// This is the shape a market-data provider hands back for a
/// `(symbols, horizon)` request. Every column has exactly one entry per index
/// row, which gives all derived series a common axis by construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPriceTable")]
pub struct PriceTable {
    index: Vec<DateTime<Utc>>,
    columns: Vec<PriceColumn>,
}

/// Wire shape of [`PriceTable`]; rebuilt through the checked constructors.
#[derive(Deserialize)]
struct RawPriceTable {
    index: Vec<DateTime<Utc>>,
    columns: Vec<PriceColumn>,
}

impl TryFrom<RawPriceTable> for PriceTable {
    type Error = PeerlineError;

    fn try_from(raw: RawPriceTable) -> Result<Self, Self::Error> {
        let mut table = Self::new(raw.index)?;
        for col in raw.columns {
            table.push_column(col.symbol, col.closes)?;
        }
        Ok(table)
    }
}

impl PriceTable {
    /// Create an empty table over a strictly increasing date index.
    ///
    /// # Errors
    /// Returns `MisalignedData` if the index is not strictly increasing.
    pub fn new(index: Vec<DateTime<Utc>>) -> Result<Self, PeerlineError> {
        if let Some(w) = index.windows(2).find(|w| w[0] >= w[1]) {
            return Err(PeerlineError::misaligned(format!(
                "table index not strictly increasing at {}",
                w[1]
            )));
        }
        Ok(Self {
            index,
            columns: Vec::new(),
        })
    }

    /// Append a column.
    ///
    /// # Errors
    /// - `MisalignedData` if `closes` does not have one entry per index row.
    /// - `InvalidInput` if the symbol already has a column.
    pub fn push_column(
        &mut self,
        symbol: Symbol,
        closes: Vec<Option<f64>>,
    ) -> Result<(), PeerlineError> {
        if closes.len() != self.index.len() {
            return Err(PeerlineError::misaligned(format!(
                "column {symbol} has {} rows, index has {}",
                closes.len(),
                self.index.len()
            )));
        }
        if self.column(&symbol).is_some() {
            return Err(PeerlineError::invalid_input(format!(
                "duplicate column for {symbol}"
            )));
        }
        let closes = closes
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        self.columns.push(PriceColumn { symbol, closes });
        Ok(())
    }

    /// Builder-style variant of [`push_column`](Self::push_column).
    ///
    /// # Errors
    /// Same as [`push_column`](Self::push_column).
    pub fn with_column(
        mut self,
        symbol: Symbol,
        closes: Vec<Option<f64>>,
    ) -> Result<Self, PeerlineError> {
        self.push_column(symbol, closes)?;
        Ok(self)
    }

    /// Date index.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// All columns in insertion order.
    #[must_use]
    pub fn columns(&self) -> &[PriceColumn] {
        &self.columns
    }

    /// Column for `symbol`, if present.
    #[must_use]
    pub fn column(&self, symbol: &Symbol) -> Option<&PriceColumn> {
        self.columns.iter().find(|c| &c.symbol == symbol)
    }

    /// Column symbols in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.columns.iter().map(|c| &c.symbol)
    }

    /// Number of index rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the index has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Symbols whose columns carry no observation.
    #[must_use]
    pub fn empty_columns(&self) -> Vec<Symbol> {
        self.columns
            .iter()
            .filter(|c| c.is_all_absent())
            .map(|c| c.symbol.clone())
            .collect()
    }

    /// Split the table into one series per column, sharing the table index.
    #[must_use]
    pub fn to_series(&self) -> Vec<SymbolSeries> {
        self.columns
            .iter()
            .map(|c| {
                SymbolSeries::from_pairs(
                    c.symbol.clone(),
                    self.index.iter().copied().zip(c.closes.iter().copied()),
                )
            })
            .collect()
    }
}
