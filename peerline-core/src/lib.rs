//! peerline-core
//!
//! Connector traits and the comparative series analyzer shared across the
//! Peerline crates.
//!
//! - `types`: re-exported data model (symbols, horizons, tables, reports).
//! - `connector`: the `PeerlineConnector` trait and the `CloseHistoryProvider`
//!   role trait.
//! - `analysis`: normalization, best/worst ranking, peer averages and deltas.
//!
//! The analysis functions are synchronous and allocation-only; nothing in this
//! crate performs I/O. Connector traits are `async_trait` based and expect a
//! Tokio 1.x runtime at the call site.
//!
//! Enable the `tracing` feature to get spans around `normalize` and
//! `build_report`.
#![warn(missing_docs)]

/// Normalization, ranking and peer comparison.
pub mod analysis;
/// Connector traits implemented by market-data sources.
pub mod connector;
pub mod types;

pub use analysis::{best_worst, build_report, delta, normalize, peer_average};
pub use connector::{CloseHistoryProvider, PeerlineConnector};
pub use types::*;
