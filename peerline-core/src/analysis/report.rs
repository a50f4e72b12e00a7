use super::{best_worst, delta, normalize, peer_average};
use crate::{ComparisonReport, Horizon, PeerComparison, PeerlineError, PriceTable};

/// Run the full comparison over a provider table.
///
/// Normalizes every column, ranks final values, and computes a peer panel per
/// symbol. Single-symbol tables produce an empty `peers` list.
///
/// # Errors
/// - `EmptyBatch` if the table has no columns.
/// - `MissingData` listing every column without a single observation.
/// - Anything [`normalize()`], [`best_worst`], [`peer_average`] or [`delta`]
///   can return.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "peerline::analysis::build_report",
        skip(prices),
        fields(symbols = prices.columns().len(), rows = prices.len(), horizon = %horizon),
    )
)]
pub fn build_report(
    prices: PriceTable,
    horizon: Horizon,
) -> Result<ComparisonReport, PeerlineError> {
    if prices.columns().is_empty() {
        return Err(PeerlineError::EmptyBatch);
    }
    let empty = prices.empty_columns();
    if !empty.is_empty() {
        return Err(PeerlineError::MissingData {
            symbols: empty.iter().map(ToString::to_string).collect(),
        });
    }

    let normalized = normalize(&prices.to_series())?;
    let best_worst = best_worst(&normalized)?;

    let peers = if normalized.len() < 2 {
        Vec::new()
    } else {
        normalized
            .symbols()
            .map(|symbol| -> Result<PeerComparison, PeerlineError> {
                let peer_average = peer_average(&normalized, symbol)?;
                let delta = delta(&normalized, symbol, &peer_average)?;
                Ok(PeerComparison {
                    symbol: symbol.clone(),
                    peer_average,
                    delta,
                })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(ComparisonReport {
        horizon,
        prices,
        normalized,
        best_worst,
        peers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;
    use chrono::{DateTime, Utc};

    fn t(day: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(day * 86_400, 0).unwrap()
    }

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn table(cols: &[(&str, Vec<Option<f64>>)]) -> PriceTable {
        let rows = cols.first().map_or(0, |(_, c)| c.len());
        let mut out = PriceTable::new((0..rows as i64).map(t).collect()).unwrap();
        for (s, closes) in cols {
            out.push_column(sym(s), closes.clone()).unwrap();
        }
        out
    }

    #[test]
    fn two_symbol_report() {
        let prices = table(&[
            ("A", vec![Some(10.0), Some(10.0), Some(20.0)]),
            ("B", vec![Some(5.0), Some(10.0), Some(5.0)]),
        ]);
        let r = build_report(prices.clone(), Horizon::M6).unwrap();
        assert_eq!(r.horizon, Horizon::M6);
        assert_eq!(r.prices, prices);
        assert_eq!(r.best_worst.best.symbol, sym("A"));
        assert_eq!(r.best_worst.worst.symbol, sym("B"));
        assert_eq!(r.peers.len(), 2);

        let b = r.peer(&sym("B")).unwrap();
        let d: Vec<_> = b.delta.iter().map(|s| s.value).collect();
        assert_eq!(d, vec![Some(0.0), Some(1.0), Some(-1.0)]);
    }

    #[test]
    fn single_symbol_has_no_peer_panels() {
        let r = build_report(table(&[("A", vec![Some(2.0), Some(3.0)])]), Horizon::Y1).unwrap();
        assert!(r.peers.is_empty());
        assert_eq!(r.best_worst.best.percent(), 150);
    }

    #[test]
    fn all_absent_columns_are_reported_together() {
        let prices = table(&[
            ("A", vec![Some(1.0), Some(2.0)]),
            ("B", vec![None, None]),
            ("C", vec![None, None]),
        ]);
        let err = build_report(prices, Horizon::M1).unwrap_err();
        assert_eq!(
            err,
            PeerlineError::MissingData {
                symbols: vec!["B".into(), "C".into()]
            }
        );
    }

    #[test]
    fn table_without_columns_is_empty_batch() {
        let prices = PriceTable::new(vec![t(0)]).unwrap();
        assert_eq!(
            build_report(prices, Horizon::M1).unwrap_err(),
            PeerlineError::EmptyBatch
        );
    }

    #[test]
    fn leading_gap_is_invalid_input() {
        let prices = table(&[
            ("A", vec![Some(1.0), Some(2.0)]),
            ("B", vec![None, Some(2.0)]),
        ]);
        assert!(matches!(
            build_report(prices, Horizon::M3),
            Err(PeerlineError::InvalidInput(_))
        ));
    }
}
