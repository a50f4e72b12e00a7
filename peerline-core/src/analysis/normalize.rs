use std::collections::HashSet;

use super::ensure_same_axis;
use crate::{NormalizedBatch, NormalizedSeries, PeerlineError, Sample, SymbolSeries};

/// Rescale every series of a batch by its first price.
///
/// For each symbol, `output[i] = price[i] / price[0]`; absent prices stay
/// absent. The output preserves batch order.
///
/// ```
/// use peerline_core::{Sample, Symbol, SymbolSeries, normalize};
/// use chrono::{DateTime, Utc};
///
/// let t = |s: i64| DateTime::<Utc>::from_timestamp(s, 0).unwrap();
/// let series = |sym: &str, px: [f64; 3]| SymbolSeries::new(
///     Symbol::new(sym).unwrap(),
///     (0..3).map(|i| Sample::present(t(i * 86_400), px[i as usize])).collect(),
/// );
///
/// let out = normalize(&[series("A", [10.0, 10.0, 20.0]), series("B", [5.0, 10.0, 5.0])]).unwrap();
/// let a: Vec<_> = out.iter().next().unwrap().samples.iter().map(|s| s.value.unwrap()).collect();
/// assert_eq!(a, vec![1.0, 1.0, 2.0]);
/// ```
///
/// # Errors
/// - `InvalidInput` if the batch is empty, a series is empty, a symbol appears
///   twice, or a series' first price is absent or zero.
/// - `MisalignedData` if series differ in length or timestamp order.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "peerline::analysis::normalize",
        skip(batch),
        fields(symbols = batch.len()),
    )
)]
pub fn normalize(batch: &[SymbolSeries]) -> Result<NormalizedBatch, PeerlineError> {
    let Some(reference) = batch.first() else {
        return Err(PeerlineError::invalid_input(
            "cannot normalize an empty batch",
        ));
    };

    let mut seen = HashSet::with_capacity(batch.len());
    for series in batch {
        if !seen.insert(&series.symbol) {
            return Err(PeerlineError::invalid_input(format!(
                "duplicate symbol {} in batch",
                series.symbol
            )));
        }
        if series.is_empty() {
            return Err(PeerlineError::invalid_input(format!(
                "series for {} is empty",
                series.symbol
            )));
        }
    }

    for series in &batch[1..] {
        ensure_same_axis(
            &reference.symbol,
            &reference.samples,
            &series.symbol,
            &series.samples,
        )?;
    }

    batch
        .iter()
        .map(normalize_series)
        .collect::<Result<Vec<_>, _>>()
        .map(NormalizedBatch::new)
}

fn normalize_series(series: &SymbolSeries) -> Result<NormalizedSeries, PeerlineError> {
    let base = match series.samples.first().and_then(|s| s.value) {
        Some(v) if v == 0.0 => {
            return Err(PeerlineError::invalid_input(format!(
                "first price of {} is zero",
                series.symbol
            )));
        }
        Some(v) => v,
        None => {
            return Err(PeerlineError::invalid_input(format!(
                "first price of {} is absent",
                series.symbol
            )));
        }
    };

    let samples = series
        .samples
        .iter()
        .map(|s| Sample::new(s.ts, s.value.map(|v| v / base)))
        .collect();

    Ok(NormalizedSeries {
        symbol: series.symbol.clone(),
        samples,
    })
}
