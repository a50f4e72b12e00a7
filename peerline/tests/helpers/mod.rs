// Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use peerline::{CacheConfig, Peerline, PriceTable, Symbol, SymbolSelection};
use peerline_mock::{DynamicMockConnector, DynamicMockController, MockConnector};

/// Common symbol constants used across tests.
pub const VALE: &str = "VALE3.SA";
pub const ITSA: &str = "ITSA4.SA";
pub const TAEE: &str = "TAEE11.SA";
pub const HASH: &str = "HASH11.SA";

/// Construct a UTC `DateTime` at midnight for readability in tests.
pub fn day(y: i32, m: u32, d: u32) -> chrono::DateTime<chrono::Utc> {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .expect("invalid date")
        .and_hms_opt(0, 0, 0)
        .expect("invalid time")
        .and_utc()
}

pub fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

pub fn selection(list: &[&str]) -> SymbolSelection {
    list.iter().map(|s| sym(s)).collect()
}

/// Table over consecutive January days, one column per `(symbol, closes)`.
pub fn table(cols: &[(&str, Vec<Option<f64>>)]) -> PriceTable {
    let rows = cols.first().map_or(0, |(_, c)| c.len());
    let index = (1..=rows as u32).map(|d| day(2024, 1, d)).collect();
    let mut t = PriceTable::new(index).unwrap();
    for (s, closes) in cols {
        t.push_column(sym(s), closes.clone()).unwrap();
    }
    t
}

/// Orchestrator over the fixture mock.
pub fn fixture_peerline() -> Peerline {
    Peerline::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap()
}

/// Orchestrator over a dynamic mock, plus its controller.
pub fn dynamic_peerline(cache: CacheConfig) -> (Peerline, DynamicMockController) {
    let (mock, controller) = DynamicMockConnector::new_with_controller("dyn");
    let p = Peerline::builder()
        .with_connector(mock)
        .cache(cache)
        .build()
        .unwrap();
    (p, controller)
}
