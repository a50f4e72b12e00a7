//! Comparative series analysis.
//!
//! Modules include:
//! - `normalize`: rescale raw closes so every series starts at 1
//! - `rank`: pick the best and worst performer by final normalized value
//! - `peers`: per-symbol peer averages and deltas
//! - `report`: run the whole pipeline over a provider table
//!
//! Every function here is pure: inputs are borrowed, outputs are new values.

/// Rescaling raw closes to a common base.
pub mod normalize;
/// Peer-average and delta series.
pub mod peers;
/// Best/worst ranking.
pub mod rank;
/// End-to-end report assembly.
pub mod report;

pub use normalize::normalize;
pub use peers::{delta, peer_average};
pub use rank::best_worst;
pub use report::build_report;

use crate::{PeerlineError, Sample, Symbol};

/// Ensure `other` shares `reference`'s timestamp axis exactly.
pub(crate) fn ensure_same_axis(
    reference_symbol: &Symbol,
    reference: &[Sample],
    other_symbol: &Symbol,
    other: &[Sample],
) -> Result<(), PeerlineError> {
    if reference.len() != other.len() {
        return Err(PeerlineError::misaligned(format!(
            "{other_symbol} has {} samples, {reference_symbol} has {}",
            other.len(),
            reference.len()
        )));
    }
    if let Some((i, (a, b))) = reference
        .iter()
        .zip(other)
        .enumerate()
        .find(|(_, (a, b))| a.ts != b.ts)
    {
        return Err(PeerlineError::misaligned(format!(
            "{other_symbol} sample {i} is at {}, {reference_symbol} is at {}",
            b.ts, a.ts
        )));
    }
    Ok(())
}
