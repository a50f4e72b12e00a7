use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use peerline_core::{CacheConfig, Horizon, PeerlineConnector, PeerlineError, PriceTable, Symbol};
use peerline_middleware::CachingConnector;
use peerline_mock::{DynamicMockConnector, DynamicMockController, MockBehavior};

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

fn table(v: f64) -> PriceTable {
    let t = |d: i64| DateTime::<Utc>::from_timestamp(d * 86_400, 0).unwrap();
    PriceTable::new(vec![t(0), t(1)])
        .unwrap()
        .with_column(sym("AAA"), vec![Some(1.0), Some(v)])
        .unwrap()
}

fn cfg(ttl_ms: u64) -> CacheConfig {
    CacheConfig {
        ttl_ms,
        max_entries: 16,
    }
}

fn wrapped(cfg: &CacheConfig) -> (Arc<CachingConnector>, DynamicMockController) {
    let (inner, controller) = DynamicMockConnector::new_with_controller("P0");
    (Arc::new(CachingConnector::new(inner, cfg)), controller)
}

#[tokio::test]
async fn second_call_hits_cache() {
    let (c, ctl) = wrapped(&cfg(60_000));
    ctl.set_behavior(Horizon::M6, MockBehavior::Return(table(2.0)))
        .await;
    let cp = c.as_close_history_provider().unwrap();

    let a = cp.closing_prices(&[sym("AAA")], Horizon::M6).await.unwrap();
    let b = cp.closing_prices(&[sym("AAA")], Horizon::M6).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(ctl.call_count().await, 1, "second call should be cached");
}

#[tokio::test]
async fn key_includes_horizon_and_symbol_order() {
    let (c, ctl) = wrapped(&cfg(60_000));
    ctl.set_behavior(Horizon::M6, MockBehavior::Return(table(2.0)))
        .await;
    ctl.set_behavior(Horizon::Y1, MockBehavior::Return(table(3.0)))
        .await;
    let cp = c.as_close_history_provider().unwrap();

    let _ = cp.closing_prices(&[sym("AAA"), sym("BBB")], Horizon::M6).await;
    let _ = cp.closing_prices(&[sym("BBB"), sym("AAA")], Horizon::M6).await;
    let y1 = cp.closing_prices(&[sym("AAA"), sym("BBB")], Horizon::Y1).await.unwrap();
    assert_eq!(y1, table(3.0));
    assert_eq!(ctl.call_count().await, 3);
}

#[tokio::test]
async fn entries_expire_after_ttl() {
    let (c, ctl) = wrapped(&cfg(50));
    ctl.set_behavior(Horizon::M1, MockBehavior::Return(table(2.0)))
        .await;
    let cp = c.as_close_history_provider().unwrap();

    let _ = cp.closing_prices(&[sym("AAA")], Horizon::M1).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    let _ = cp.closing_prices(&[sym("AAA")], Horizon::M1).await.unwrap();
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let (c, ctl) = wrapped(&cfg(60_000));
    ctl.set_behavior(
        Horizon::M3,
        MockBehavior::Fail(PeerlineError::connector("P0", "down")),
    )
    .await;
    let cp = c.as_close_history_provider().unwrap();
    assert!(cp.closing_prices(&[sym("AAA")], Horizon::M3).await.is_err());

    ctl.set_behavior(Horizon::M3, MockBehavior::Return(table(2.0)))
        .await;
    let ok = cp.closing_prices(&[sym("AAA")], Horizon::M3).await.unwrap();
    assert_eq!(ok, table(2.0));
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn invalidate_and_clear_force_refetch() {
    let (c, ctl) = wrapped(&cfg(60_000));
    ctl.set_behavior(Horizon::M6, MockBehavior::Return(table(2.0)))
        .await;
    let cp = c.as_close_history_provider().unwrap();
    let key = [sym("AAA")];

    let _ = cp.closing_prices(&key, Horizon::M6).await.unwrap();
    c.invalidate(&key, Horizon::M6).await;
    let _ = cp.closing_prices(&key, Horizon::M6).await.unwrap();
    assert_eq!(ctl.call_count().await, 2);

    c.clear();
    let _ = cp.closing_prices(&key, Horizon::M6).await.unwrap();
    assert_eq!(ctl.call_count().await, 3);
}

#[tokio::test]
async fn zero_ttl_passes_through() {
    let (c, ctl) = wrapped(&CacheConfig::disabled());
    assert!(!c.is_enabled());
    ctl.set_behavior(Horizon::M6, MockBehavior::Return(table(2.0)))
        .await;
    let cp = c.as_close_history_provider().unwrap();
    let _ = cp.closing_prices(&[sym("AAA")], Horizon::M6).await.unwrap();
    let _ = cp.closing_prices(&[sym("AAA")], Horizon::M6).await.unwrap();
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test]
async fn forwards_identity() {
    let (c, _ctl) = wrapped(&cfg(1_000));
    assert_eq!(c.name(), "P0");
    assert_eq!(c.vendor(), "DynamicMock");
}
