use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use peerline_core::{
    CacheConfig, CloseHistoryProvider, Horizon, PeerlineConnector, PeerlineError, PriceTable,
    Symbol,
};

/// Identity of a closing-price request. Symbol order is significant because
/// it fixes the column order of the returned table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    symbols: Vec<Symbol>,
    horizon: Horizon,
}

impl CacheKey {
    fn new(symbols: &[Symbol], horizon: Horizon) -> Self {
        Self {
            symbols: symbols.to_vec(),
            horizon,
        }
    }
}

/// Connector wrapper that memoizes closing-price tables for a fixed TTL.
///
/// Behavior:
/// - Only successful tables are stored; errors always reach the caller and the
///   next call retries the inner connector.
/// - Concurrent misses on the same key share one inner call.
/// - A `RateLimited` error drops the entry for that key.
/// - With a TTL or capacity of 0 the wrapper is a pass-through.
pub struct CachingConnector {
    inner: Arc<dyn PeerlineConnector>,
    store: Option<Cache<CacheKey, Arc<PriceTable>>>,
}

impl CachingConnector {
    /// Wrap `inner` using the TTL and capacity from `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn PeerlineConnector>, cfg: &CacheConfig) -> Self {
        let store = cfg.ttl().map(|ttl| {
            Cache::builder()
                .max_capacity(cfg.max_entries)
                .time_to_live(ttl)
                .build()
        });
        Self { inner, store }
    }

    /// True when tables are being memoized.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Drop the cached table for `(symbols, horizon)`, if any.
    pub async fn invalidate(&self, symbols: &[Symbol], horizon: Horizon) {
        if let Some(store) = &self.store {
            store.invalidate(&CacheKey::new(symbols, horizon)).await;
        }
    }

    /// Drop every cached table.
    pub fn clear(&self) {
        if let Some(store) = &self.store {
            store.invalidate_all();
        }
    }

    fn inner_provider(&self) -> Result<&dyn CloseHistoryProvider, PeerlineError> {
        self.inner
            .as_close_history_provider()
            .ok_or_else(|| PeerlineError::unsupported("closing-prices"))
    }
}

#[async_trait]
impl PeerlineConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn as_close_history_provider(&self) -> Option<&dyn CloseHistoryProvider> {
        self.inner
            .as_close_history_provider()
            .map(|_| self as &dyn CloseHistoryProvider)
    }
}

#[async_trait]
impl CloseHistoryProvider for CachingConnector {
    async fn closing_prices(
        &self,
        symbols: &[Symbol],
        horizon: Horizon,
    ) -> Result<PriceTable, PeerlineError> {
        let inner = self.inner_provider()?;
        let Some(store) = &self.store else {
            return inner.closing_prices(symbols, horizon).await;
        };

        let key = CacheKey::new(symbols, horizon);
        let fetched = store
            .try_get_with(key.clone(), async {
                inner.closing_prices(symbols, horizon).await.map(Arc::new)
            })
            .await;

        match fetched {
            Ok(table) => Ok((*table).clone()),
            Err(err) => {
                let err = (*err).clone();
                if err.is_rate_limited() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        connector = self.inner.name(),
                        horizon = %horizon,
                        "dropping cached closes after rate limit"
                    );
                    store.invalidate(&key).await;
                }
                Err(err)
            }
        }
    }
}
