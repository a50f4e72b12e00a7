use std::cmp::Ordering;

use crate::{BestWorst, NormalizedBatch, PeerlineError, Performer};

/// Pick the highest and lowest final normalized value in a batch.
///
/// A symbol's final value is its last present sample. Ties compare the
/// `(value, symbol)` pair, so the result is deterministic: among equal values
/// `best` is the lexicographically greatest symbol and `worst` the smallest.
///
/// # Errors
/// - `EmptyBatch` if the batch holds no symbols.
/// - `InvalidInput` if some series has no present value at all.
pub fn best_worst(batch: &NormalizedBatch) -> Result<BestWorst, PeerlineError> {
    let mut finals = Vec::with_capacity(batch.len());
    for series in batch.iter() {
        let Some(value) = series.final_value() else {
            return Err(PeerlineError::invalid_input(format!(
                "{} has no observation to rank",
                series.symbol
            )));
        };
        finals.push(Performer {
            symbol: series.symbol.clone(),
            value,
        });
    }

    let best = finals.iter().max_by(|a, b| rank_order(a, b));
    let worst = finals.iter().min_by(|a, b| rank_order(a, b));
    match (best, worst) {
        (Some(best), Some(worst)) => Ok(BestWorst {
            best: best.clone(),
            worst: worst.clone(),
        }),
        _ => Err(PeerlineError::EmptyBatch),
    }
}

fn rank_order(a: &Performer, b: &Performer) -> Ordering {
    a.value
        .total_cmp(&b.value)
        .then_with(|| a.symbol.cmp(&b.symbol))
}
