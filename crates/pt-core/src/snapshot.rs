//! Phase occupancy snapshots taken at arrival events.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::grammar::{Vocabulary, match_occupancy};
use crate::line::RawLine;
use crate::types::PhaseId;

/// Occupancy of every phase at one arrival instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalSnapshot {
    pub timestamp: f64,
    /// Pool counter reported alongside the phases.
    pub pool: u32,
    /// Per-phase counts in [`PhaseId::PHASES`] order.
    pub counts: [u32; 4],
}

impl ArrivalSnapshot {
    /// Count for `location`; the pool counter for [`PhaseId::Pool`].
    pub const fn count(&self, location: PhaseId) -> u32 {
        match location.index() {
            Some(i) => self.counts[i],
            None => self.pool,
        }
    }

    /// Builds a snapshot from an arrival line, if it carries all five counters.
    pub fn from_line(line: &RawLine) -> Option<Self> {
        let occupancy = match_occupancy(&line.text)?;
        Some(Self {
            timestamp: line.timestamp,
            pool: occupancy.pool,
            counts: occupancy.phases,
        })
    }
}

/// Extracts arrival snapshots, ordered by timestamp.
///
/// Lines without the arrival marker are ignored; arrival lines missing any of
/// the five counters are dropped. Ties keep trace order.
pub fn extract_snapshots(lines: &[RawLine], vocab: &Vocabulary) -> Vec<ArrivalSnapshot> {
    let mut snapshots: Vec<ArrivalSnapshot> = lines
        .iter()
        .filter(|line| line.text.contains(vocab.arrival_marker.as_str()))
        .filter_map(|line| {
            let snapshot = ArrivalSnapshot::from_line(line);
            if snapshot.is_none() {
                tracing::trace!(t = line.timestamp, "arrival without occupancy counters");
            }
            snapshot
        })
        .collect();
    // -0.0 and 0.0 are the same instant; NaN never reaches here.
    snapshots.sort_by(|a, b| {
        a.timestamp
            .partial_cmp(&b.timestamp)
            .unwrap_or(Ordering::Equal)
    });
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(t: f64, text: &str) -> RawLine {
        RawLine {
            timestamp: t,
            text: text.to_string(),
        }
    }

    #[test]
    fn extracts_counts_and_pool() {
        let lines = [line(4.0, "evento arrivo R2 Pool=3, Ph1=1, Ph2=0, Ph3=2, Ph4=5")];
        let snaps = extract_snapshots(&lines, &Vocabulary::default());

        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].counts, [1, 0, 2, 5]);
        assert_eq!(snaps[0].pool, 3);
        assert_eq!(snaps[0].count(PhaseId::Ph4), 5);
        assert_eq!(snaps[0].count(PhaseId::Pool), 3);
    }

    #[test]
    fn ignores_lines_without_arrival_marker() {
        let lines = [
            line(1.0, "partenza Pool=3, Ph1=1, Ph2=0, Ph3=2, Ph4=5"),
            line(2.0, "Arrivo Pool=3, Ph1=1, Ph2=0, Ph3=2, Ph4=5"),
        ];
        assert!(extract_snapshots(&lines, &Vocabulary::default()).is_empty());
    }

    #[test]
    fn drops_partial_arrivals_and_keeps_going() {
        let lines = [
            line(1.0, "arrivo Pool=3, Ph1=1, Ph2=0"),
            line(2.0, "arrivo Pool=0, Ph1=0, Ph2=0, Ph3=0, Ph4=1"),
        ];
        let snaps = extract_snapshots(&lines, &Vocabulary::default());
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].count(PhaseId::Ph4), 1);
    }

    #[test]
    fn sorts_by_timestamp_keeping_ties_in_order() {
        let lines = [
            line(3.0, "arrivo Pool=0, Ph1=3, Ph2=0, Ph3=0, Ph4=0"),
            line(1.0, "arrivo Pool=0, Ph1=1, Ph2=0, Ph3=0, Ph4=0"),
            line(2.0, "arrivo Pool=0, Ph1=20, Ph2=0, Ph3=0, Ph4=0"),
            line(2.0, "arrivo Pool=0, Ph1=21, Ph2=0, Ph3=0, Ph4=0"),
            line(2.0, "arrivo Pool=0, Ph1=22, Ph2=0, Ph3=0, Ph4=0"),
        ];
        let snaps = extract_snapshots(&lines, &Vocabulary::default());
        let ph1: Vec<u32> = snaps.iter().map(|s| s.count(PhaseId::Ph1)).collect();
        assert_eq!(ph1, [1, 20, 21, 22, 3]);
    }

    #[test]
    fn signed_zero_timestamps_tie_in_trace_order() {
        let lines = [
            line(0.0, "arrivo Pool=0, Ph1=1, Ph2=0, Ph3=0, Ph4=0"),
            line(-0.0, "arrivo Pool=0, Ph1=2, Ph2=0, Ph3=0, Ph4=0"),
        ];
        let snaps = extract_snapshots(&lines, &Vocabulary::default());
        let ph1: Vec<u32> = snaps.iter().map(|s| s.count(PhaseId::Ph1)).collect();
        assert_eq!(ph1, [1, 2]);
    }

    #[test]
    fn order_is_independent_of_input_permutation() {
        let base = [
            line(5.0, "arrivo Pool=0, Ph1=5, Ph2=0, Ph3=0, Ph4=0"),
            line(0.5, "arrivo Pool=0, Ph1=0, Ph2=0, Ph3=0, Ph4=0"),
            line(2.5, "arrivo Pool=0, Ph1=2, Ph2=0, Ph3=0, Ph4=0"),
        ];
        let vocab = Vocabulary::default();
        let expected = extract_snapshots(&base, &vocab);
        for rotation in 1..base.len() {
            let mut permuted = base.to_vec();
            permuted.rotate_left(rotation);
            let snaps = extract_snapshots(&permuted, &vocab);
            assert_eq!(snaps, expected);
            assert!(snaps.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        }
    }

    #[test]
    fn custom_marker_is_respected() {
        let vocab = Vocabulary {
            arrival_marker: "arrival".to_string(),
            ..Vocabulary::default()
        };
        let lines = [
            line(1.0, "arrival Pool=1, Ph1=0, Ph2=0, Ph3=0, Ph4=0"),
            line(2.0, "arrivo Pool=1, Ph1=0, Ph2=0, Ph3=0, Ph4=0"),
        ];
        let snaps = extract_snapshots(&lines, &vocab);
        assert_eq!(snaps.len(), 1);
        assert!((snaps[0].timestamp - 1.0).abs() < f64::EPSILON);
    }
}
