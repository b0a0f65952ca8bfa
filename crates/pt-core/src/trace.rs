//! Reading whole traces and running both extractors over them.

use std::io::{self, BufRead};

use serde::Serialize;

use crate::grammar::Vocabulary;
use crate::line::{RawLine, parse_line};
use crate::snapshot::{ArrivalSnapshot, extract_snapshots};
use crate::transition::{MoveEvent, extract_moves};

/// Outcome of one read pass over a trace.
#[derive(Debug, Default)]
pub struct TraceRead {
    /// Lines that parsed, in trace order.
    pub lines: Vec<RawLine>,
    /// Lines dropped as malformed (header excluded).
    pub skipped: usize,
    /// The IO error that cut the pass short, if any.
    pub error: Option<io::Error>,
}

/// Reads a trace, skipping the header line.
///
/// Malformed lines are counted and skipped. A read error stops the pass; the
/// lines collected up to that point are kept and the error is returned
/// alongside them.
pub fn read_trace<R: BufRead>(reader: R, delimiter: char) -> TraceRead {
    let mut read = TraceRead::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(
                    line = idx + 1,
                    error = %e,
                    parsed = read.lines.len(),
                    "trace read interrupted, keeping partial results"
                );
                read.error = Some(e);
                break;
            }
        };

        if idx == 0 {
            continue;
        }

        if let Some(raw) = parse_line(&line, delimiter) {
            read.lines.push(raw);
        } else {
            tracing::debug!(line = idx + 1, "skipping malformed trace line");
            read.skipped += 1;
        }
    }

    read
}

/// The two views reconstructed from a trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraceAnalysis {
    pub snapshots: Vec<ArrivalSnapshot>,
    pub moves: Vec<MoveEvent>,
}

impl TraceAnalysis {
    /// Runs both extractors over parsed lines.
    pub fn from_lines(lines: &[RawLine], vocab: &Vocabulary) -> Self {
        let analysis = Self {
            snapshots: extract_snapshots(lines, vocab),
            moves: extract_moves(lines, vocab),
        };
        tracing::debug!(
            lines = lines.len(),
            snapshots = analysis.snapshots.len(),
            moves = analysis.moves.len(),
            "trace analysed"
        );
        analysis
    }

    #[cfg(test)]
    fn from_reader<R: BufRead>(reader: R, delimiter: char, vocab: &Vocabulary) -> Self {
        let read = read_trace(reader, delimiter);
        Self::from_lines(&read.lines, vocab)
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty() && self.moves.is_empty()
    }
}
