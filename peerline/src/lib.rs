//! Peerline compares how a basket of stocks performed over a shared window.
//!
//! Overview
//! - Fetches closing prices for the selected symbols from one connector that
//!   implements the `peerline_core` contracts.
//! - Normalizes every series to its first price so different price levels
//!   become comparable growth curves.
//! - Reports the best and worst performer and, for every symbol, the average
//!   of its peers and the gap between the two.
//!
//! Key behaviors and trade-offs
//! - Caching: tables are memoized per ordered symbol list and horizon. Fresh
//!   results are cheap; stale data can be served until the TTL runs out.
//! - Rate limits: a throttled provider drops the matching cache entry and the
//!   error is surfaced unchanged. There is no automatic retry.
//! - Failure model: any fetch or analysis error ends the request. No partial
//!   report is produced.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use peerline::{Horizon, Peerline};
//!
//! let peerline = Peerline::builder()
//!     .with_connector(Arc::new(MyFeed::new()))
//!     .build()?;
//!
//! let selection = peerline.selection_from_query([("stocks", "VALE3.SA,ITSA4.SA")])?;
//! let report = peerline.compare(&selection, Horizon::Y1).await?;
//! println!(
//!     "best {} at {}%",
//!     report.best_worst.best.symbol,
//!     report.best_worst.best.percent()
//! );
//! ```
//!
//! See `peerline/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;

pub use core::{Peerline, PeerlineBuilder};

pub use peerline_middleware::CachingConnector;

// Re-export core types for convenience
pub use peerline_core::{
    BestWorst, CacheConfig, CloseHistoryProvider, ComparisonReport, DEFAULT_SYMBOLS, Horizon,
    NormalizedBatch, NormalizedSeries, PeerComparison, PeerlineConfig, PeerlineConnector,
    PeerlineError, Performer, PriceColumn, PriceTable, SELECTION_QUERY_KEY, Sample, Symbol,
    SymbolSelection, SymbolSeries, best_worst, build_report, delta, normalize, peer_average,
};
