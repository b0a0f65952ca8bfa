//! Locating and reading trace and summary files in the working directory.
//!
//! Missing inputs are not errors: each loader returns an empty result and the
//! commands downstream skip their own work.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pt_core::{Mode, Table, TraceAnalysis, TraceRead, read_trace};

use crate::Config;

/// Reads the trace at `path`.
///
/// A missing file yields an empty read. The file is closed before returning,
/// including when the read stopped on an error.
pub fn load_trace(path: &Path, delimiter: char) -> TraceRead {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "trace not found, skipping trace views");
            return TraceRead::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to open trace");
            return TraceRead {
                error: Some(e),
                ..TraceRead::default()
            };
        }
    };

    let read = read_trace(BufReader::new(file), delimiter);
    if read.skipped > 0 {
        tracing::debug!(
            path = %path.display(),
            skipped = read.skipped,
            "skipped malformed trace lines"
        );
    }
    read
}

/// Loads the configured trace and reconstructs snapshots and moves.
pub fn load_analysis(config: &Config) -> TraceAnalysis {
    let read = load_trace(&config.trace_path(), config.delimiter);
    let analysis = TraceAnalysis::from_lines(&read.lines, &config.vocabulary);
    if analysis.is_empty() && !read.lines.is_empty() {
        tracing::info!(
            lines = read.lines.len(),
            "trace has no arrivals or moves, check the configured vocabulary"
        );
    }
    analysis
}

/// Files in `dir` whose names match `pattern`, in sorted order.
pub fn discover(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{pattern}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let paths = glob::glob(&full)
        .with_context(|| format!("invalid file pattern: {pattern}"))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .collect();
    Ok(paths)
}

/// Loads every non-empty table matching `pattern`, keyed by mode.
///
/// Unreadable or malformed files are skipped with a warning. When two files
/// map to the same mode the later one (in sorted order) wins.
pub fn load_tables(dir: &Path, pattern: &str) -> Result<BTreeMap<Mode, Table>> {
    let files = discover(dir, pattern)?;
    if files.is_empty() {
        tracing::info!(pattern, dir = %dir.display(), "no summary files found, skipping");
    }

    let mut tables = BTreeMap::new();
    for path in files {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let mode = match Mode::from_source(stem) {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot derive mode");
                continue;
            }
        };
        let table = match File::open(&path)
            .map_err(pt_core::TableError::from)
            .and_then(|f| Table::parse(BufReader::new(f)))
        {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read summary");
                continue;
            }
        };
        if table.is_empty() {
            tracing::debug!(path = %path.display(), "summary has no rows");
            continue;
        }
        tracing::debug!(path = %path.display(), %mode, rows = table.rows.len(), "loaded summary");
        if tables.insert(mode.clone(), table).is_some() {
            tracing::warn!(%mode, path = %path.display(), "mode loaded twice, keeping later file");
        }
    }
    Ok(tables)
}
