use async_trait::async_trait;

use crate::{Horizon, PeerlineError, PriceTable, Symbol};

/// Focused role trait for connectors that serve closing-price history.
#[async_trait]
pub trait CloseHistoryProvider: Send + Sync {
    /// Fetch closing prices for `symbols` over `horizon`.
    ///
    /// The returned table has one column per requested symbol, in request
    /// order, on a shared date index. Symbols the source knows nothing about
    /// come back as all-absent columns rather than errors.
    ///
    /// # Errors
    /// Implementations report throttling as `PeerlineError::RateLimited` and
    /// other source failures as `PeerlineError::Connector`.
    async fn closing_prices(
        &self,
        symbols: &[Symbol],
        horizon: Horizon,
    ) -> Result<PriceTable, PeerlineError>;
}

/// A market-data source the orchestrator can be wired to.
#[async_trait]
pub trait PeerlineConnector: Send + Sync {
    /// Stable connector name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Data vendor behind the connector.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Closing-price history capability, if supported.
    fn as_close_history_provider(&self) -> Option<&dyn CloseHistoryProvider> {
        None
    }
}
