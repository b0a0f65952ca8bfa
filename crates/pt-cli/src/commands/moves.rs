//! Moves command for listing phase transitions.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use pt_core::MoveEvent;

use crate::Config;
use crate::loader::load_analysis;

/// Formats moves one per line, oldest first.
pub fn format_moves(moves: &[MoveEvent]) -> String {
    let mut output = String::new();
    if moves.is_empty() {
        writeln!(output, "No moves found.").unwrap();
        return output;
    }

    writeln!(output, "MOVES ({})", moves.len()).unwrap();
    for m in moves {
        writeln!(output, "t={:.3}  {}→{}", m.timestamp, m.from, m.to).unwrap();
    }
    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let analysis = load_analysis(config);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&analysis.moves)?)?;
    } else {
        write!(writer, "{}", format_moves(&analysis.moves))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pt_core::PhaseId;

    #[test]
    fn lists_moves() {
        let moves = [
            MoveEvent {
                timestamp: 2.0,
                from: PhaseId::Ph1,
                to: PhaseId::Ph2,
            },
            MoveEvent {
                timestamp: 3.25,
                from: PhaseId::Ph4,
                to: PhaseId::Pool,
            },
        ];
        insta::assert_snapshot!(format_moves(&moves), @r"
        MOVES (2)
        t=2.000  Ph1→Ph2
        t=3.250  Ph4→Pool
        ");
    }

    #[test]
    fn empty_moves_say_so() {
        assert_eq!(format_moves(&[]), "No moves found.\n");
    }
}
