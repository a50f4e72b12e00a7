use std::time::Duration;

use async_trait::async_trait;
use peerline_core::connector::{CloseHistoryProvider, PeerlineConnector};
use peerline_core::{Horizon, PeerlineError, PriceTable, Symbol};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::closes::LAST_SESSION;

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// A few reserved symbols drive failure paths:
/// - `FAIL`: the call fails with a connector error.
/// - `RATELIMIT`: the call fails with `RateLimited`.
/// - `TIMEOUT`: the call sleeps for [`MockConnector::TIMEOUT_DELAY`] first.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Latency injected for the `TIMEOUT` symbol.
    pub const TIMEOUT_DELAY: Duration = Duration::from_millis(200);

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(symbols: &[Symbol]) -> Result<(), PeerlineError> {
        for s in symbols {
            match s.as_str() {
                "FAIL" => {
                    return Err(PeerlineError::connector(
                        "peerline-mock",
                        "forced failure: closing-prices",
                    ));
                }
                "RATELIMIT" => return Err(PeerlineError::rate_limited("peerline-mock")),
                "TIMEOUT" => tokio::time::sleep(Self::TIMEOUT_DELAY).await,
                _ => {}
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PeerlineConnector for MockConnector {
    fn name(&self) -> &'static str {
        "peerline-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_close_history_provider(&self) -> Option<&dyn CloseHistoryProvider> {
        Some(self as &dyn CloseHistoryProvider)
    }
}

#[async_trait]
impl CloseHistoryProvider for MockConnector {
    async fn closing_prices(
        &self,
        symbols: &[Symbol],
        horizon: Horizon,
    ) -> Result<PriceTable, PeerlineError> {
        Self::maybe_fail_or_timeout(symbols).await?;
        fixtures::closes::table(symbols, horizon)
    }
}
