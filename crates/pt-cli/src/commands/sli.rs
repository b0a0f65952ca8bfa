//! SLI command for comparing headline figures across modes.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use pt_core::{BarChart, SliMetric, SliSummary, summarize_sli};
use serde::Serialize;

use crate::Config;
use crate::loader::load_tables;

/// Columns shown in the text table, in order.
const SLI_COLUMNS: [&str; 4] = ["total_time_s", "rejections", "rejection_rate", "idle_mean"];

/// Summaries plus the bar charts built from them.
#[derive(Debug, Serialize)]
pub struct SliReport {
    pub summaries: Vec<SliSummary>,
    pub charts: Vec<BarChart>,
}

impl SliReport {
    pub fn new(summaries: Vec<SliSummary>) -> Self {
        let charts = SliMetric::ALL
            .iter()
            .filter_map(|m| m.chart(&summaries))
            .collect();
        Self { summaries, charts }
    }
}

pub fn load_report(config: &Config) -> Result<SliReport> {
    let tables = load_tables(&config.work_dir, &config.sli_glob)?;
    Ok(SliReport::new(summarize_sli(&tables)))
}

/// Formats summaries as an aligned table; missing cells show as `-`.
pub fn format_sli(summaries: &[SliSummary]) -> String {
    let mut output = String::new();
    if summaries.is_empty() {
        writeln!(output, "No SLI summaries found.").unwrap();
        return output;
    }

    let cells: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            SLI_COLUMNS
                .iter()
                .map(|c| s.value(c).map_or_else(|| "-".to_string(), |v| v.to_string()))
                .collect()
        })
        .collect();
    let mode_width = summaries
        .iter()
        .map(|s| s.mode.as_str().len())
        .chain(std::iter::once("mode".len()))
        .max()
        .unwrap_or(4);
    let widths: Vec<usize> = SLI_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(c.len())
        })
        .collect();

    writeln!(output, "SLI SUMMARY ({} modes)", summaries.len()).unwrap();
    let mut header = format!("{:<mode_width$}", "mode");
    for (c, w) in SLI_COLUMNS.iter().zip(&widths) {
        write!(header, "  {c:>w$}").unwrap();
    }
    writeln!(output, "{header}").unwrap();

    for (summary, row) in summaries.iter().zip(&cells) {
        let mut line = format!("{:<mode_width$}", summary.mode);
        for (cell, w) in row.iter().zip(&widths) {
            write!(line, "  {cell:>w$}").unwrap();
        }
        writeln!(output, "{line}").unwrap();
    }
    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let report = load_report(config)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_sli(&report.summaries))?;
    }
    Ok(())
}
