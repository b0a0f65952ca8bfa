//! Export command for writing renderable views as JSON documents.
//!
//! Each document is named after the figure it feeds. Views with no data are
//! not written, so an empty working directory exports nothing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pt_core::{IntervalMetric, SliMetric, bucket_transitions, occupancy_matrix};
use serde::Serialize;

use super::runs::load_runs;
use super::sli::load_report;
use crate::Config;
use crate::loader::load_analysis;

pub const HEATMAP_NAME: &str = "debug_state_heatmap";
pub const TIMELINE_NAME: &str = "debug_moves_timeline";

/// Writes `value` as pretty JSON to `<dir>/<name>.json`.
fn write_document<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.json"));
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&path, json + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote document");
    Ok(path)
}

/// Builds every view and writes the non-empty ones into `out_dir`.
///
/// Returns the written paths in figure order.
pub fn export_all(config: &Config, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let mut written = Vec::new();

    let analysis = load_analysis(config);
    if let Some(matrix) = occupancy_matrix(&analysis.snapshots) {
        written.push(write_document(out_dir, HEATMAP_NAME, &matrix)?);
    }
    if !analysis.moves.is_empty() {
        let buckets = bucket_transitions(&analysis.moves);
        written.push(write_document(out_dir, TIMELINE_NAME, &buckets)?);
    }

    let runs = load_runs(config)?;
    for metric in IntervalMetric::ALL {
        if let Some(chart) = metric.chart(&runs) {
            written.push(write_document(out_dir, metric.output_name(), &chart)?);
        } else {
            tracing::debug!(metric = metric.column(), "no interval data, skipping");
        }
    }

    let report = load_report(config)?;
    for metric in SliMetric::ALL {
        if let Some(chart) = metric.chart(&report.summaries) {
            written.push(write_document(out_dir, metric.output_name(), &chart)?);
        }
    }

    tracing::info!(count = written.len(), dir = %out_dir.display(), "export complete");
    Ok(written)
}

pub fn run<W: Write>(writer: &mut W, config: &Config, out: Option<&Path>) -> Result<()> {
    let out_dir = out.map_or_else(|| config.output_path(), Path::to_path_buf);
    let written = export_all(config, &out_dir)?;

    for path in &written {
        if let Some(name) = path.file_name() {
            writeln!(writer, "  {}", name.to_string_lossy())?;
        }
    }
    writeln!(
        writer,
        "Exported {} document(s) to {}",
        written.len(),
        out_dir.display()
    )?;
    Ok(())
}
