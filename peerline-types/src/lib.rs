//! Peerline data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod horizon;
mod reports;
mod selection;
mod series;
mod symbol;

pub use config::{CacheConfig, DEFAULT_SYMBOLS, PeerlineConfig};
pub use error::PeerlineError;
pub use horizon::Horizon;
pub use reports::{BestWorst, ComparisonReport, PeerComparison, Performer};
pub use selection::{SELECTION_QUERY_KEY, SymbolSelection};
pub use series::{NormalizedBatch, NormalizedSeries, PriceColumn, PriceTable, Sample, SymbolSeries};
pub use symbol::{MAX_SYMBOL_LEN, Symbol};
