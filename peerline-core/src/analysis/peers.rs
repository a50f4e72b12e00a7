use super::ensure_same_axis;
use crate::{NormalizedBatch, NormalizedSeries, PeerlineError, Sample, Symbol};

/// Mean normalized value of every symbol except `target`, per timestamp.
///
/// Absent peer values are skipped; a timestamp where no peer has a value
/// yields an absent sample.
///
/// # Errors
/// - `InsufficientPeers` if the batch holds fewer than two symbols.
/// - `InvalidInput` if `target` is not in the batch.
/// - `MisalignedData` if a peer's axis differs from the target's.
pub fn peer_average(
    batch: &NormalizedBatch,
    target: &Symbol,
) -> Result<Vec<Sample>, PeerlineError> {
    if batch.len() < 2 {
        return Err(PeerlineError::InsufficientPeers { found: batch.len() });
    }
    let target_series = lookup(batch, target)?;
    let peers: Vec<&NormalizedSeries> = batch.iter().filter(|s| &s.symbol != target).collect();
    for peer in &peers {
        ensure_same_axis(
            target,
            &target_series.samples,
            &peer.symbol,
            &peer.samples,
        )?;
    }

    let out = target_series
        .samples
        .iter()
        .enumerate()
        .map(|(i, anchor)| {
            let (sum, n) = peers
                .iter()
                .filter_map(|p| p.samples[i].value)
                .fold((0.0_f64, 0_u32), |(sum, n), v| (sum + v, n + 1));
            let mean = (n > 0).then(|| sum / f64::from(n));
            Sample::new(anchor.ts, mean)
        })
        .collect();
    Ok(out)
}

/// `target`'s normalized series minus `peer_avg`, per timestamp.
///
/// The result is absent wherever either side is absent.
///
/// # Errors
/// - `InvalidInput` if `target` is not in the batch.
/// - `MisalignedData` if `peer_avg` does not share the target's axis.
pub fn delta(
    batch: &NormalizedBatch,
    target: &Symbol,
    peer_avg: &[Sample],
) -> Result<Vec<Sample>, PeerlineError> {
    let series = lookup(batch, target)?;
    if series.samples.len() != peer_avg.len() {
        return Err(PeerlineError::misaligned(format!(
            "peer average has {} samples, {target} has {}",
            peer_avg.len(),
            series.samples.len()
        )));
    }

    series
        .samples
        .iter()
        .zip(peer_avg)
        .map(|(own, avg)| {
            if own.ts != avg.ts {
                return Err(PeerlineError::misaligned(format!(
                    "peer average sample at {} does not match {target} at {}",
                    avg.ts, own.ts
                )));
            }
            let value = own.value.zip(avg.value).map(|(a, b)| a - b);
            Ok(Sample::new(own.ts, value))
        })
        .collect()
}

fn lookup<'a>(
    batch: &'a NormalizedBatch,
    target: &Symbol,
) -> Result<&'a NormalizedSeries, PeerlineError> {
    batch
        .get(target)
        .ok_or_else(|| PeerlineError::invalid_input(format!("{target} is not in the batch")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn t(day: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(day * 86_400, 0).unwrap()
    }

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn norm(s: &str, values: &[Option<f64>]) -> NormalizedSeries {
        NormalizedSeries {
            symbol: sym(s),
            samples: values
                .iter()
                .enumerate()
                .map(|(i, v)| Sample::new(t(i as i64), *v))
                .collect(),
        }
    }

    fn values(samples: &[Sample]) -> Vec<Option<f64>> {
        samples.iter().map(|s| s.value).collect()
    }

    #[test]
    fn two_symbol_peer_average_and_delta() {
        let batch = NormalizedBatch::new(vec![
            norm("A", &[Some(1.0), Some(1.0), Some(2.0)]),
            norm("B", &[Some(1.0), Some(2.0), Some(1.0)]),
        ]);
        let avg = peer_average(&batch, &sym("A")).unwrap();
        assert_eq!(values(&avg), vec![Some(1.0), Some(2.0), Some(1.0)]);
        let d = delta(&batch, &sym("A"), &avg).unwrap();
        assert_eq!(values(&d), vec![Some(0.0), Some(-1.0), Some(1.0)]);
    }

    #[test]
    fn excludes_target_and_averages_rest() {
        let batch = NormalizedBatch::new(vec![
            norm("A", &[Some(1.0), Some(9.0)]),
            norm("B", &[Some(1.0), Some(2.0)]),
            norm("C", &[Some(1.0), Some(4.0)]),
        ]);
        let avg = peer_average(&batch, &sym("A")).unwrap();
        assert_eq!(values(&avg), vec![Some(1.0), Some(3.0)]);
    }

    #[test]
    fn absent_peers_are_skipped() {
        let batch = NormalizedBatch::new(vec![
            norm("A", &[Some(1.0), Some(1.0), Some(1.0)]),
            norm("B", &[Some(1.0), None, None]),
            norm("C", &[Some(1.0), Some(3.0), None]),
        ]);
        let avg = peer_average(&batch, &sym("A")).unwrap();
        assert_eq!(values(&avg), vec![Some(1.0), Some(3.0), None]);
        let d = delta(&batch, &sym("A"), &avg).unwrap();
        assert_eq!(values(&d), vec![Some(0.0), Some(-2.0), None]);
    }

    #[test]
    fn single_symbol_has_no_peers() {
        let batch = NormalizedBatch::new(vec![norm("A", &[Some(1.0)])]);
        assert_eq!(
            peer_average(&batch, &sym("A")).unwrap_err(),
            PeerlineError::InsufficientPeers { found: 1 }
        );
    }

    #[test]
    fn unknown_target_is_invalid() {
        let batch = NormalizedBatch::new(vec![norm("A", &[Some(1.0)]), norm("B", &[Some(1.0)])]);
        assert!(matches!(
            peer_average(&batch, &sym("Z")),
            Err(PeerlineError::InvalidInput(_))
        ));
        assert!(matches!(
            delta(&batch, &sym("Z"), &[]),
            Err(PeerlineError::InvalidInput(_))
        ));
    }

    #[test]
    fn misaligned_inputs_are_rejected() {
        let batch = NormalizedBatch::new(vec![
            norm("A", &[Some(1.0), Some(2.0)]),
            norm("B", &[Some(1.0)]),
        ]);
        assert!(matches!(
            peer_average(&batch, &sym("A")),
            Err(PeerlineError::MisalignedData(_))
        ));

        let ok = NormalizedBatch::new(vec![
            norm("A", &[Some(1.0), Some(2.0)]),
            norm("B", &[Some(1.0), Some(2.0)]),
        ]);
        let short = vec![Sample::present(t(0), 1.0)];
        assert!(matches!(
            delta(&ok, &sym("A"), &short),
            Err(PeerlineError::MisalignedData(_))
        ));
        let shifted = vec![Sample::present(t(1), 1.0), Sample::present(t(2), 2.0)];
        assert!(matches!(
            delta(&ok, &sym("A"), &shifted),
            Err(PeerlineError::MisalignedData(_))
        ));
    }
}
