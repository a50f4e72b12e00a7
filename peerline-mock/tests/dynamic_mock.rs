use std::time::Duration;

use chrono::{DateTime, Utc};
use peerline_core::{Horizon, PeerlineError, PriceTable, Symbol};
use peerline_mock::{DynamicMockConnector, MockBehavior};

fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

fn table() -> PriceTable {
    let t = |d: i64| DateTime::<Utc>::from_timestamp(d * 86_400, 0).unwrap();
    PriceTable::new(vec![t(0), t(1)])
        .unwrap()
        .with_column(sym("AAA"), vec![Some(1.0), Some(2.0)])
        .unwrap()
}

#[tokio::test]
async fn test_mock_closes_return() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_behavior(Horizon::M6, MockBehavior::Return(table()))
        .await;

    let cp = mock.as_close_history_provider().expect("close provider");
    let got = cp
        .closing_prices(&[sym("AAA")], Horizon::M6)
        .await
        .expect("closes ok");
    assert_eq!(got, table());
    assert_eq!(controller.call_count().await, 1);
}

#[tokio::test]
async fn test_mock_closes_fail() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    let err = PeerlineError::Other("boom".to_string());
    controller
        .set_behavior(Horizon::Y1, MockBehavior::Fail(err.clone()))
        .await;

    let cp = mock.as_close_history_provider().expect("close provider");
    let got = cp
        .closing_prices(&[sym("AAA")], Horizon::Y1)
        .await
        .expect_err("err");
    assert_eq!(got, err);
}

#[tokio::test]
async fn test_mock_unconfigured_horizon_is_unsupported() {
    let (mock, _controller) = DynamicMockConnector::new_with_controller("P0");
    let cp = mock.as_close_history_provider().expect("close provider");
    let got = cp
        .closing_prices(&[sym("AAA")], Horizon::M1)
        .await
        .expect_err("err");
    assert!(matches!(got, PeerlineError::Unsupported { .. }));
}

#[tokio::test]
async fn test_mock_hang_never_resolves() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller.set_behavior(Horizon::M3, MockBehavior::Hang).await;
    let cp = mock.as_close_history_provider().expect("close provider");
    let res = tokio::time::timeout(
        Duration::from_millis(50),
        cp.closing_prices(&[sym("AAA")], Horizon::M3),
    )
    .await;
    assert!(res.is_err(), "hang should not complete");
}

#[tokio::test]
async fn test_mock_logs_requests_and_clears() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    controller
        .set_behavior(Horizon::M6, MockBehavior::Return(table()))
        .await;
    let cp = mock.as_close_history_provider().expect("close provider");
    let _ = cp.closing_prices(&[sym("AAA"), sym("BBB")], Horizon::M6).await;

    let reqs = controller.requests().await;
    assert_eq!(reqs, vec![(vec![sym("AAA"), sym("BBB")], Horizon::M6)]);

    controller.clear().await;
    assert_eq!(controller.call_count().await, 0);
    assert!(cp.closing_prices(&[sym("AAA")], Horizon::M6).await.is_err());
}
