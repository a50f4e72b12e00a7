use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use peerline_core::connector::{CloseHistoryProvider, PeerlineConnector};
use peerline_core::{Horizon, PeerlineError, PriceTable, Symbol};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(PeerlineError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    close_rules: HashMap<Horizon, MockBehavior<PriceTable>>,
    requests: Vec<(Vec<Symbol>, Horizon)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `closing_prices` calls over `horizon`.
    pub async fn set_behavior(&self, horizon: Horizon, behavior: MockBehavior<PriceTable>) {
        let mut guard = self.state.lock().await;
        guard.close_rules.insert(horizon, behavior);
    }

    /// Number of `closing_prices` calls received so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    /// Copy of every `(symbols, horizon)` request received, in arrival order.
    pub async fn requests(&self) -> Vec<(Vec<Symbol>, Horizon)> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        guard.close_rules.clear();
        guard.requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Horizons without a configured behavior fail with `Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PeerlineConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PeerlineConnector>, controller)
    }
}

#[async_trait]
impl PeerlineConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_close_history_provider(&self) -> Option<&dyn CloseHistoryProvider> {
        Some(self as &dyn CloseHistoryProvider)
    }
}

#[async_trait]
impl CloseHistoryProvider for DynamicMockConnector {
    async fn closing_prices(
        &self,
        symbols: &[Symbol],
        horizon: Horizon,
    ) -> Result<PriceTable, PeerlineError> {
        // Snapshot the behavior without holding the lock across the hang
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push((symbols.to_vec(), horizon));
            guard.close_rules.get(&horizon).cloned()
        };
        match behavior {
            Some(MockBehavior::Return(table)) => Ok(table),
            Some(MockBehavior::Fail(err)) => Err(err),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(PeerlineError::unsupported(format!(
                "closing-prices/{horizon}"
            ))),
        }
    }
}
