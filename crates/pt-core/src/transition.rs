//! Movements of entities between adjacent phases and into the pool.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::grammar::{MovePatterns, Vocabulary};
use crate::line::RawLine;
use crate::types::PhaseId;

/// The adjacent location pairs a move can connect, in canonical order.
pub const CANONICAL_MOVES: [(PhaseId, PhaseId); 4] = [
    (PhaseId::Ph1, PhaseId::Ph2),
    (PhaseId::Ph2, PhaseId::Ph3),
    (PhaseId::Ph3, PhaseId::Ph4),
    (PhaseId::Ph4, PhaseId::Pool),
];

/// A recorded change of an entity's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub timestamp: f64,
    pub from: PhaseId,
    pub to: PhaseId,
}

impl MoveEvent {
    /// Moves described by one movement line.
    ///
    /// The interior form (`da PhK a PhK+1`) and the pool-entry form
    /// (`da Ph4 a Pool`) are checked independently, so a line carrying both
    /// yields two moves.
    pub fn from_line(line: &RawLine, patterns: &MovePatterns) -> Vec<Self> {
        let mut moves = Vec::new();
        if let Some((from, to)) = patterns.interior(&line.text) {
            moves.push(Self {
                timestamp: line.timestamp,
                from,
                to,
            });
        }
        if patterns.pool_entry(&line.text) {
            moves.push(Self {
                timestamp: line.timestamp,
                from: PhaseId::Ph4,
                to: PhaseId::Pool,
            });
        }
        moves
    }
}

/// Extracts moves from movement lines, ordered by timestamp.
///
/// Ties keep trace order.
pub fn extract_moves(lines: &[RawLine], vocab: &Vocabulary) -> Vec<MoveEvent> {
    let patterns = MovePatterns::new(vocab);
    let mut moves: Vec<MoveEvent> = lines
        .iter()
        .filter(|line| line.text.contains(vocab.movement_marker.as_str()))
        .flat_map(|line| MoveEvent::from_line(line, &patterns))
        .collect();
    // -0.0 and 0.0 are the same instant; NaN never reaches here.
    moves.sort_by(|a, b| {
        a.timestamp
            .partial_cmp(&b.timestamp)
            .unwrap_or(Ordering::Equal)
    });
    moves
}
