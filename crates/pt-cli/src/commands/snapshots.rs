//! Snapshots command for listing occupancy at each arrival.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use pt_core::ArrivalSnapshot;

use crate::Config;
use crate::loader::load_analysis;

/// Formats snapshots one per line, oldest first.
pub fn format_snapshots(snapshots: &[ArrivalSnapshot]) -> String {
    let mut output = String::new();
    if snapshots.is_empty() {
        writeln!(output, "No arrival snapshots found.").unwrap();
        return output;
    }

    writeln!(output, "ARRIVAL SNAPSHOTS ({})", snapshots.len()).unwrap();
    for s in snapshots {
        let [ph1, ph2, ph3, ph4] = s.counts;
        writeln!(
            output,
            "t={:.3}  Pool={}  Ph1={ph1}  Ph2={ph2}  Ph3={ph3}  Ph4={ph4}",
            s.timestamp, s.pool
        )
        .unwrap();
    }
    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let analysis = load_analysis(config);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&analysis.snapshots)?)?;
    } else {
        write!(writer, "{}", format_snapshots(&analysis.snapshots))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn lists_snapshots() {
        let snapshots = [
            ArrivalSnapshot {
                timestamp: 1.0,
                pool: 3,
                counts: [1, 0, 2, 5],
            },
            ArrivalSnapshot {
                timestamp: 2.5,
                pool: 2,
                counts: [2, 0, 2, 5],
            },
        ];
        assert_snapshot!(format_snapshots(&snapshots), @r"
        ARRIVAL SNAPSHOTS (2)
        t=1.000  Pool=3  Ph1=1  Ph2=0  Ph3=2  Ph4=5
        t=2.500  Pool=2  Ph1=2  Ph2=0  Ph3=2  Ph4=5
        ");
    }

    #[test]
    fn empty_snapshots_say_so() {
        assert_eq!(format_snapshots(&[]), "No arrival snapshots found.\n");
    }
}
