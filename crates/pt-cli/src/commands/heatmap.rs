//! Heatmap command for the phase occupancy matrix.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use pt_core::{OccupancyMatrix, occupancy_matrix};

use crate::Config;
use crate::loader::load_analysis;

/// Renders the matrix as a grid: phases down, arrival times across.
pub fn format_heatmap(matrix: Option<&OccupancyMatrix>) -> String {
    let mut output = String::new();
    let Some(matrix) = matrix else {
        writeln!(output, "No arrival snapshots found.").unwrap();
        return output;
    };

    let width = matrix
        .labels
        .iter()
        .map(String::len)
        .chain(std::iter::once(matrix.max().to_string().len()))
        .max()
        .unwrap_or(1);

    writeln!(
        output,
        "PHASE OCCUPANCY AT ARRIVALS ({} snapshots, max {})",
        matrix.width(),
        matrix.max()
    )
    .unwrap();
    writeln!(output).unwrap();

    let mut header = String::from("t (s)");
    for label in &matrix.labels {
        write!(header, "  {label:>width$}").unwrap();
    }
    writeln!(output, "{header}").unwrap();

    for (phase, row) in matrix.phases.iter().zip(&matrix.cells) {
        let mut line = format!("{phase:<5}");
        for count in row {
            write!(line, "  {count:>width$}").unwrap();
        }
        writeln!(output, "{}", line.trim_end()).unwrap();
    }
    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let analysis = load_analysis(config);
    let matrix = occupancy_matrix(&analysis.snapshots);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&matrix)?)?;
    } else {
        write!(writer, "{}", format_heatmap(matrix.as_ref()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pt_core::ArrivalSnapshot;

    #[test]
    fn grid_has_a_row_per_phase() {
        let matrix = occupancy_matrix(&[
            ArrivalSnapshot {
                timestamp: 1.0,
                pool: 0,
                counts: [1, 0, 2, 5],
            },
            ArrivalSnapshot {
                timestamp: 12.5,
                pool: 0,
                counts: [10, 0, 0, 3],
            },
        ]);
        insta::assert_snapshot!(format_heatmap(matrix.as_ref()), @r"
        PHASE OCCUPANCY AT ARRIVALS (2 snapshots, max 10)

        t (s)   1.0  12.5
        Ph1       1    10
        Ph2       0     0
        Ph3       2     0
        Ph4       5     3
        ");
    }

    #[test]
    fn no_matrix_says_so() {
        assert_eq!(format_heatmap(None), "No arrival snapshots found.\n");
    }
}
