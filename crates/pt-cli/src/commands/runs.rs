//! Runs command for comparing interval metrics across modes.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use pt_core::{ComparativeChart, IntervalMetric, Mode, RunSeries, align_runs};

use crate::Config;
use crate::loader::load_tables;

const METRIC_NAMES: &str = "pool_now, target_tot, rejection_rate, idle_mean_interval";

/// Loads and aligns every interval summary in the working directory.
pub fn load_runs(config: &Config) -> Result<BTreeMap<Mode, RunSeries>> {
    let tables = load_tables(&config.work_dir, &config.intervals_glob)?;
    Ok(align_runs(tables))
}

/// Formats one chart as a block of `t:value` points per mode.
pub fn format_chart(chart: &ComparativeChart) -> String {
    let mut output = String::new();
    writeln!(output, "{} [{}]", chart.title.to_uppercase(), chart.y_label).unwrap();

    let width = chart
        .series
        .iter()
        .map(|s| s.mode.as_str().len())
        .max()
        .unwrap_or(0);
    for series in &chart.series {
        let mut line = format!("{:<width$}", series.mode);
        if series.points.is_empty() {
            line.push_str("  (no points)");
        }
        for point in &series.points {
            write!(line, "  {:.3}:{}", point.t, point.value).unwrap();
        }
        writeln!(output, "{}", line.trim_end()).unwrap();
    }
    output
}

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    metric: Option<&str>,
    json: bool,
) -> Result<()> {
    let metrics = match metric {
        Some(name) => {
            let metric = name.parse::<IntervalMetric>().with_context(|| {
                format!("invalid --metric {name:?}, expected one of: {METRIC_NAMES}")
            })?;
            vec![metric]
        }
        None => IntervalMetric::ALL.to_vec(),
    };

    let runs = load_runs(config)?;
    let charts: Vec<(IntervalMetric, Option<ComparativeChart>)> =
        metrics.into_iter().map(|m| (m, m.chart(&runs))).collect();

    if json {
        let present: Vec<&ComparativeChart> =
            charts.iter().filter_map(|(_, c)| c.as_ref()).collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&present)?)?;
        return Ok(());
    }

    if runs.is_empty() {
        writeln!(writer, "No interval summaries found.")?;
        return Ok(());
    }

    for (i, (metric, chart)) in charts.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        match chart {
            Some(chart) => write!(writer, "{}", format_chart(chart))?,
            None => writeln!(writer, "{}: no data ({})", metric.title(), metric.column())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn write_runs(dir: &std::path::Path) {
        fs::write(
            dir.join("timeseries_intervals_nofuture.csv"),
            "t_start,t_end,pool_now,rejection_rate\n0,10,3,0.5\n10,20,2,0.25\n",
        )
        .unwrap();
        fs::write(
            dir.join("timeseries_intervals_default.csv"),
            "t_start,t_end,pool_now\n0,10,1\n10,,4\n",
        )
        .unwrap();
    }

    fn config_for(dir: &std::path::Path) -> Config {
        Config {
            work_dir: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn all_metrics_in_canonical_mode_order() {
        let temp = TempDir::new().unwrap();
        write_runs(temp.path());

        let mut out = Vec::new();
        run(&mut out, &config_for(temp.path()), None, false).unwrap();

        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        POOL OVER TIME [pool_now]
        default   5.000:1
        nofuture  5.000:3  15.000:2

        Target replicas over time: no data (target_tot)

        REJECTION RATE PER INTERVAL [rejection_rate]
        nofuture  5.000:0.5  15.000:0.25

        Idle mean per interval: no data (idle_mean_interval)
        ");
    }

    #[test]
    fn single_metric_as_json() {
        let temp = TempDir::new().unwrap();
        write_runs(temp.path());

        let mut out = Vec::new();
        run(&mut out, &config_for(temp.path()), Some("rejection_rate"), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["y_label"], "rejection_rate");
        assert_eq!(value[0]["series"][0]["mode"], "nofuture");
        assert_eq!(value[0]["series"][0]["points"][1]["t"], 15.0);
    }

    #[test]
    fn unknown_metric_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut out = Vec::new();
        let err = run(&mut out, &config_for(temp.path()), Some("bogus"), false).unwrap_err();
        assert!(format!("{err:#}").contains("unknown metric: bogus"));
    }

    #[test]
    fn no_summaries_says_so() {
        let temp = TempDir::new().unwrap();
        let mut out = Vec::new();
        run(&mut out, &config_for(temp.path()), None, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No interval summaries found.\n");
    }
}
