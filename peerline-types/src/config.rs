//! Configuration types shared by the orchestrator and middleware.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::horizon::Horizon;
use crate::symbol::Symbol;

/// Tickers preselected when no shared selection is present.
pub const DEFAULT_SYMBOLS: [&str; 13] = [
    "ITSA4.SA",
    "WIZC3.SA",
    "SOJA3.SA",
    "TAEE11.SA",
    "GOAU4.SA",
    "CSAN3.SA",
    "VALE3.SA",
    "XPLG11.SA",
    "MXRF11.SA",
    "BTHF11.SA",
    "IRDM11.SA",
    "RECT11.SA",
    "HASH11.SA",
];

fn default_symbols() -> Vec<Symbol> {
    DEFAULT_SYMBOLS
        .iter()
        .filter_map(|s| Symbol::new(s).ok())
        .collect()
}

/// Cache settings for fetched price tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for a cached table in milliseconds; 0 disables caching.
    pub ttl_ms: u64,
    /// Maximum number of `(symbols, horizon)` entries kept.
    pub max_entries: u64,
}

impl CacheConfig {
    /// A configuration that turns caching off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            ttl_ms: 0,
            max_entries: 0,
        }
    }

    /// Effective TTL, or `None` when caching is disabled.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_ms == 0 || self.max_entries == 0 {
            None
        } else {
            Some(Duration::from_millis(self.ttl_ms))
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 60 * 60 * 1000,
            max_entries: 64,
        }
    }
}

/// Global configuration for the `Peerline` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerlineConfig {
    /// Timeout applied to each provider call.
    pub provider_timeout: Duration,
    /// Cache for fetched price tables.
    pub cache: CacheConfig,
    /// Horizon used when the caller does not pick one.
    pub default_horizon: Horizon,
    /// Selection used when no shared selection parameter is present.
    pub default_symbols: Vec<Symbol>,
    /// Symbols always offered by the picker, in addition to the selection.
    pub catalog: Vec<Symbol>,
}

impl Default for PeerlineConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            cache: CacheConfig::default(),
            default_horizon: Horizon::default(),
            default_symbols: default_symbols(),
            catalog: default_symbols(),
        }
    }
}
