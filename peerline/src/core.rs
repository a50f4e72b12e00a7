use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use peerline_core::{
    CacheConfig, CloseHistoryProvider, ComparisonReport, Horizon, PeerlineConfig,
    PeerlineConnector, PeerlineError, PriceTable, Symbol, SymbolSelection, build_report,
};
use peerline_middleware::CachingConnector;

/// Orchestrator that fetches closing prices and runs the comparison.
pub struct Peerline {
    pub(crate) source: Arc<CachingConnector>,
    pub(crate) cfg: PeerlineConfig,
}

/// Builder for constructing a `Peerline` orchestrator with custom configuration.
pub struct PeerlineBuilder {
    connector: Option<Arc<dyn PeerlineConnector>>,
    cfg: PeerlineConfig,
}

impl Default for PeerlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerlineBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connector; you must register one via [`with_connector`](Self::with_connector).
    /// - Defaults: 10s provider timeout, one-hour cache of up to 64 tables,
    ///   a six-month horizon and the built-in default symbol list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cfg: PeerlineConfig::default(),
        }
    }

    /// Register the market-data connector.
    ///
    /// Behavior and trade-offs:
    /// - A single connector serves every request; calling this again replaces
    ///   the previous one.
    /// - The connector must expose a closing-price provider or `build` fails.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn PeerlineConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PeerlineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the per-call provider timeout.
    ///
    /// Behavior and trade-offs:
    /// - Bounds each fetch; an expired call surfaces `ProviderTimeout` and
    ///   nothing is cached for it.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Configure the table cache.
    ///
    /// Behavior and trade-offs:
    /// - Repeated `(symbols, horizon)` requests inside the TTL are served from
    ///   memory, trading freshness for fewer provider calls.
    /// - `CacheConfig::disabled()` sends every request to the provider.
    #[must_use]
    pub const fn cache(mut self, cfg: CacheConfig) -> Self {
        self.cfg.cache = cfg;
        self
    }

    /// Horizon used by callers that do not pick one.
    #[must_use]
    pub const fn default_horizon(mut self, horizon: Horizon) -> Self {
        self.cfg.default_horizon = horizon;
        self
    }

    /// Selection used when no shared selection parameter is present.
    #[must_use]
    pub fn default_symbols(mut self, symbols: Vec<Symbol>) -> Self {
        self.cfg.default_symbols = symbols;
        self
    }

    /// Symbols always offered by the picker.
    #[must_use]
    pub fn catalog(mut self, symbols: Vec<Symbol>) -> Self {
        self.cfg.catalog = symbols;
        self
    }

    /// Build the `Peerline` orchestrator.
    ///
    /// # Errors
    /// - `InvalidInput` if no connector has been registered via [`with_connector`](Self::with_connector).
    /// - `Unsupported` if the connector does not serve closing prices.
    pub fn build(self) -> Result<Peerline, PeerlineError> {
        let Some(connector) = self.connector else {
            return Err(PeerlineError::invalid_input(
                "no connector registered; add one via with_connector(...)",
            ));
        };
        if connector.as_close_history_provider().is_none() {
            return Err(PeerlineError::unsupported(format!(
                "closing-prices ({})",
                connector.name()
            )));
        }
        let source = Arc::new(CachingConnector::new(connector, &self.cfg.cache));
        Ok(Peerline {
            source,
            cfg: self.cfg,
        })
    }
}

impl Peerline {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "peerline::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, PeerlineError>
    where
        Fut: Future<Output = Result<T, PeerlineError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(PeerlineError::provider_timeout(connector_name)))
    }

    /// Start building a new `Peerline` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let peerline = peerline::Peerline::builder()
    ///     .with_connector(Arc::new(MyFeed::new()))
    ///     .provider_timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PeerlineBuilder {
        PeerlineBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PeerlineConfig {
        &self.cfg
    }

    /// Resolve the selection from shareable query pairs, falling back to the
    /// configured default symbols.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the parameter holds an invalid symbol.
    pub fn selection_from_query<'a, I>(&self, pairs: I) -> Result<SymbolSelection, PeerlineError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        SymbolSelection::from_query(pairs, &self.cfg.default_symbols)
    }

    /// Picker options for `selection`: the configured catalog plus anything
    /// already selected, sorted.
    #[must_use]
    pub fn symbol_options(&self, selection: &SymbolSelection) -> Vec<Symbol> {
        selection.options(&self.cfg.catalog)
    }

    /// Fetch the closing-price table for `symbols` over `horizon`.
    ///
    /// Behavior and trade-offs:
    /// - Served from the cache when an entry for the same ordered symbol list
    ///   and horizon is still fresh.
    /// - A rate-limited provider drops the cached entry for this request so
    ///   the next attempt refetches; the error is returned as-is.
    ///
    /// # Errors
    /// - `InvalidInput` for an empty or duplicated symbol list.
    /// - `ProviderTimeout` when the call exceeds the configured timeout.
    /// - Any provider error (`RateLimited`, `Connector`, ...).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "peerline::core::closing_prices",
            skip(self, symbols),
            fields(symbols = symbols.len(), horizon = %horizon),
        )
    )]
    pub async fn closing_prices(
        &self,
        symbols: &[Symbol],
        horizon: Horizon,
    ) -> Result<PriceTable, PeerlineError> {
        if symbols.is_empty() {
            return Err(PeerlineError::invalid_input("no symbols selected"));
        }
        let mut seen: HashSet<&Symbol> = HashSet::new();
        for s in symbols {
            if !seen.insert(s) {
                return Err(PeerlineError::invalid_input(format!(
                    "duplicate symbol in request: {s}"
                )));
            }
        }

        let source: &dyn CloseHistoryProvider = &*self.source;
        let res = Self::provider_call_with_timeout(
            self.source.name(),
            self.cfg.provider_timeout,
            source.closing_prices(symbols, horizon),
        )
        .await;

        if let Err(e) = &res
            && e.is_rate_limited()
        {
            self.source.invalidate(symbols, horizon).await;
            #[cfg(feature = "tracing")]
            tracing::warn!(
                connector = self.source.name(),
                horizon = %horizon,
                error = %e,
                "provider is rate limiting; dropped cached closes, retry later"
            );
        }
        res
    }

    /// Fetch closes for `selection` and build the full comparison report.
    ///
    /// Any fetch or analysis error ends the request; no partial report is
    /// produced.
    ///
    /// # Errors
    /// Everything [`closing_prices`](Self::closing_prices) and
    /// [`analyze`](Self::analyze) can return.
    pub async fn compare(
        &self,
        selection: &SymbolSelection,
        horizon: Horizon,
    ) -> Result<ComparisonReport, PeerlineError> {
        let prices = self.closing_prices(selection.symbols(), horizon).await?;
        Self::analyze(prices, horizon)
    }

    /// [`compare`](Self::compare) over the configured default horizon.
    ///
    /// # Errors
    /// Same as [`compare`](Self::compare).
    pub async fn compare_default(
        &self,
        selection: &SymbolSelection,
    ) -> Result<ComparisonReport, PeerlineError> {
        self.compare(selection, self.cfg.default_horizon).await
    }

    /// Run the comparison over an already-fetched table.
    ///
    /// # Errors
    /// `EmptyBatch`, `MissingData`, `InvalidInput` or `MisalignedData` from
    /// the analyzer.
    pub fn analyze(prices: PriceTable, horizon: Horizon) -> Result<ComparisonReport, PeerlineError> {
        build_report(prices, horizon)
    }

    /// Drop the cached table for `(symbols, horizon)`.
    pub async fn invalidate(&self, symbols: &[Symbol], horizon: Horizon) {
        self.source.invalidate(symbols, horizon).await;
    }

    /// Drop every cached table.
    pub fn clear_cache(&self) {
        self.source.clear();
    }
}
