//! Report envelopes produced by the analyzer and the orchestrator.

use serde::{Deserialize, Serialize};

use crate::horizon::Horizon;
use crate::series::{NormalizedBatch, PriceTable, Sample};
use crate::symbol::Symbol;

/// A symbol together with its final normalized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    /// Ranked symbol.
    pub symbol: Symbol,
    /// Final normalized value (1.0 means unchanged over the window).
    pub value: f64,
}

impl Performer {
    /// Final value as a whole percentage of the starting price.
    ///
    /// `1.234` renders as `123`. Halfway cases round to even.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(&self) -> i64 {
        (self.value * 100.0).round_ties_even() as i64
    }
}

/// Best and worst performer of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestWorst {
    /// Symbol with the highest final normalized value.
    pub best: Performer,
    /// Symbol with the lowest final normalized value.
    pub worst: Performer,
}

/// One symbol set against the average of every other symbol in the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerComparison {
    /// Target symbol.
    pub symbol: Symbol,
    /// Mean normalized value of all other symbols, per timestamp.
    pub peer_average: Vec<Sample>,
    /// Target normalized value minus the peer average, per timestamp.
    pub delta: Vec<Sample>,
}

/// Everything the presentation layer needs for one `(symbols, horizon)` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Requested lookback window.
    pub horizon: Horizon,
    /// Raw closes as returned by the provider.
    pub prices: PriceTable,
    /// Normalized series in request order.
    pub normalized: NormalizedBatch,
    /// Best/worst summary.
    pub best_worst: BestWorst,
    /// Per-symbol peer panels in request order; empty for single-symbol requests.
    pub peers: Vec<PeerComparison>,
}

impl ComparisonReport {
    /// Peer panel for `symbol`, if one was computed.
    #[must_use]
    pub fn peer(&self, symbol: &Symbol) -> Option<&PeerComparison> {
        self.peers.iter().find(|p| &p.symbol == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn performer(value: f64) -> Performer {
        Performer {
            symbol: Symbol::new("X").unwrap(),
            value,
        }
    }

    #[test]
    fn percent_rounds_like_the_summary_tiles() {
        assert_eq!(performer(1.234).percent(), 123);
        assert_eq!(performer(0.876).percent(), 88);
        assert_eq!(performer(2.0).percent(), 200);
        // 0.125 * 100 == 12.5 exactly; ties go to even
        assert_eq!(performer(0.125).percent(), 12);
    }
}
