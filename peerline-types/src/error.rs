use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the peerline workspace.
///
/// Covers analyzer input validation, alignment failures, provider-tagged
/// failures, and the provider rate-limit condition that invalidates cached
/// results.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PeerlineError {
    /// Input cannot be analyzed (empty series, zero or absent leading price, bad symbol).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Series in a batch do not share the same timestamp axis.
    #[error("misaligned data: {0}")]
    MisalignedData(String),

    /// A peer average needs at least two symbols in the batch.
    #[error("insufficient peers: need at least 2 symbols, found {found}")]
    InsufficientPeers {
        /// Number of symbols present in the batch.
        found: usize,
    },

    /// Best/worst ranking was requested on a batch without symbols.
    #[error("empty batch: no symbols to rank")]
    EmptyBatch,

    /// The provider returned columns without a single price.
    #[error("no data loaded for symbols: {}", symbols.join(", "))]
    MissingData {
        /// Symbols whose columns were entirely absent.
        symbols: Vec<String>,
    },

    /// The provider is throttling requests.
    #[error("{provider} is rate limiting requests; try again later")]
    RateLimited {
        /// Provider name that reported the limit.
        provider: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
    },

    /// A provider returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The connector does not implement the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label, e.g. "close-history".
        capability: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl PeerlineError {
    /// Helper: build an `InvalidInput` error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Helper: build a `MisalignedData` error.
    pub fn misaligned(msg: impl Into<String>) -> Self {
        Self::MisalignedData(msg.into())
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `RateLimited` error for a provider name.
    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability label.
    #[must_use]
    pub fn unsupported(capability: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: capability.into(),
        }
    }

    /// True when the provider signalled throttling.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// True when the failure came from the data source rather than the input.
    ///
    /// Provider failures may succeed on a later attempt; input failures need
    /// corrected input.
    #[must_use]
    pub const fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::ProviderTimeout { .. } | Self::Connector { .. }
        )
    }
}
