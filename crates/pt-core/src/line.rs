//! Splitting raw trace lines into timestamp and event text.

use serde::{Deserialize, Serialize};

/// Field delimiter used by simulation traces.
pub const DEFAULT_DELIMITER: char = '|';

/// One timestamped trace line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    /// Simulation time in seconds.
    pub timestamp: f64,
    /// Everything after the first delimiter, verbatim.
    pub text: String,
}

/// Parses `<timestamp><delimiter><text>`.
///
/// Returns `None` when the delimiter is missing, the timestamp field is blank,
/// or it does not parse as a number (`NaN` included). Only the first delimiter
/// splits; the text keeps any later ones.
pub fn parse_line(line: &str, delimiter: char) -> Option<RawLine> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (timestamp, text) = line.split_once(delimiter)?;
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return None;
    }
    let timestamp: f64 = timestamp.parse().ok()?;
    if timestamp.is_nan() {
        return None;
    }
    Some(RawLine {
        timestamp,
        text: text.to_string(),
    })
}
