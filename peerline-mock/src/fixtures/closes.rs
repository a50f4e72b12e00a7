use chrono::{DateTime, Months, NaiveDate, Utc};
use peerline_core::{Horizon, PeerlineError, PriceTable, Symbol};

/// Last trading day covered by the fixtures; horizons count back from here.
pub const LAST_SESSION: &str = "2024-08-30";

const SESSIONS: [&str; 11] = [
    "2024-01-02",
    "2024-02-01",
    "2024-03-01",
    "2024-04-01",
    "2024-05-02",
    "2024-06-03",
    "2024-07-01",
    "2024-07-15",
    "2024-08-01",
    "2024-08-15",
    "2024-08-30",
];

/// Closing prices aligned with `SESSIONS`; `None` means the ticker did not
/// trade that day.
pub fn by_symbol(s: &str) -> Option<[Option<f64>; 11]> {
    match s {
        "ITSA4.SA" => Some([
            Some(10.00),
            Some(10.20),
            Some(10.10),
            Some(10.50),
            Some(10.40),
            Some(10.80),
            Some(11.00),
            Some(11.10),
            Some(11.30),
            Some(11.50),
            Some(11.60),
        ]),
        "VALE3.SA" => Some([
            Some(70.0),
            Some(68.5),
            Some(66.0),
            Some(64.2),
            Some(63.0),
            Some(61.5),
            Some(62.0),
            Some(60.8),
            Some(59.9),
            Some(60.5),
            Some(61.0),
        ]),
        "TAEE11.SA" => Some([
            Some(35.0),
            Some(35.2),
            Some(35.1),
            Some(34.9),
            Some(35.5),
            Some(35.8),
            Some(36.0),
            None,
            Some(36.2),
            Some(36.4),
            Some(36.5),
        ]),
        "MXRF11.SA" => Some([
            Some(10.50),
            Some(10.40),
            Some(10.45),
            Some(10.30),
            Some(10.35),
            Some(10.20),
            Some(10.25),
            Some(10.10),
            Some(10.15),
            Some(10.00),
            Some(10.05),
        ]),
        "HASH11.SA" => Some([
            Some(40.0),
            None,
            Some(52.0),
            Some(55.0),
            Some(50.0),
            Some(58.0),
            Some(62.0),
            Some(60.0),
            Some(65.0),
            Some(63.0),
            Some(70.0),
        ]),
        "ZERO" => Some([Some(0.0); 11]),
        _ => None,
    }
}

fn session(date: &str) -> Result<DateTime<Utc>, PeerlineError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| PeerlineError::Other(format!("bad fixture date {date}")))
}

/// Build the provider table for `symbols` over `horizon`.
///
/// Rows are the sessions inside the horizon window on which at least one
/// requested symbol traded. Unknown symbols yield all-absent columns.
pub fn table(symbols: &[Symbol], horizon: Horizon) -> Result<PriceTable, PeerlineError> {
    let last = session(LAST_SESSION)?;
    let start = last
        .checked_sub_months(Months::new(horizon.months()))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let columns: Vec<Option<[Option<f64>; 11]>> =
        symbols.iter().map(|s| by_symbol(s.as_str())).collect();

    let mut rows = Vec::new();
    let mut index = Vec::new();
    for (i, date) in SESSIONS.iter().enumerate() {
        let ts = session(date)?;
        if ts < start {
            continue;
        }
        let traded = columns
            .iter()
            .any(|c| c.is_some_and(|closes| closes[i].is_some()));
        if traded {
            rows.push(i);
            index.push(ts);
        }
    }

    let mut out = PriceTable::new(index)?;
    for (symbol, closes) in symbols.iter().zip(columns) {
        let values = rows
            .iter()
            .map(|&i| closes.and_then(|c| c[i]))
            .collect();
        out.push_column(symbol.clone(), values)?;
    }
    Ok(out)
}
