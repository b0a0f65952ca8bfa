//! Shaping extracted sequences into heatmap and timeline structures.

use serde::Serialize;

use crate::snapshot::ArrivalSnapshot;
use crate::transition::{CANONICAL_MOVES, MoveEvent};
use crate::types::PhaseId;

/// Phase occupancy over arrivals: one row per phase, one column per snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyMatrix {
    /// Row labels, always `[Ph1, Ph2, Ph3, Ph4]`.
    pub phases: [PhaseId; 4],
    /// Column labels: snapshot timestamps with one decimal.
    pub labels: Vec<String>,
    /// `cells[row][column]`.
    pub cells: Vec<Vec<u32>>,
}

impl OccupancyMatrix {
    pub fn width(&self) -> usize {
        self.labels.len()
    }

    /// Largest count in the matrix.
    pub fn max(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Builds the 4 x N occupancy matrix, or `None` for no snapshots.
///
/// Columns keep the order of `snapshots`.
pub fn occupancy_matrix(snapshots: &[ArrivalSnapshot]) -> Option<OccupancyMatrix> {
    if snapshots.is_empty() {
        return None;
    }
    let labels = snapshots
        .iter()
        .map(|s| format!("{:.1}", s.timestamp))
        .collect();
    let cells = PhaseId::PHASES
        .iter()
        .map(|&phase| snapshots.iter().map(|s| s.count(phase)).collect())
        .collect();
    Some(OccupancyMatrix {
        phases: PhaseId::PHASES,
        labels,
        cells,
    })
}

/// Moves along one adjacent pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionBucket {
    pub from: PhaseId,
    pub to: PhaseId,
    /// Display label such as `Ph1→Ph2`.
    pub label: String,
    /// Member timestamps in input order.
    pub timestamps: Vec<f64>,
    pub count: usize,
}

/// The four canonical transition buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionBuckets {
    pub buckets: Vec<TransitionBucket>,
}

impl TransitionBuckets {
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Partitions moves into the canonical buckets.
///
/// All four buckets are always present, empty ones with a count of zero.
pub fn bucket_transitions(moves: &[MoveEvent]) -> TransitionBuckets {
    let buckets = CANONICAL_MOVES
        .iter()
        .map(|&(from, to)| {
            let timestamps: Vec<f64> = moves
                .iter()
                .filter(|m| m.from == from && m.to == to)
                .map(|m| m.timestamp)
                .collect();
            TransitionBucket {
                from,
                to,
                label: format!("{from}→{to}"),
                count: timestamps.len(),
                timestamps,
            }
        })
        .collect();
    TransitionBuckets { buckets }
}
