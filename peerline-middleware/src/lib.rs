//! peerline-middleware
//!
//! Connector wrappers layered between the orchestrator and a market-data
//! source. Currently this is the closing-price cache.

mod cache;

pub use crate::cache::CachingConnector;
