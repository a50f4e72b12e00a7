//! Re-export of foundational types from `peerline-types`.
// Consolidated re-exports so downstream crates can depend on `peerline-core` only

pub use peerline_types::{
    BestWorst, CacheConfig, ComparisonReport, DEFAULT_SYMBOLS, Horizon, MAX_SYMBOL_LEN,
    NormalizedBatch, NormalizedSeries, PeerComparison, PeerlineConfig, PeerlineError, Performer,
    PriceColumn, PriceTable, SELECTION_QUERY_KEY, Sample, Symbol, SymbolSelection, SymbolSeries,
};
