//! Aligning per-mode interval summaries on a shared time axis.
//!
//! Each mode contributes one [`Table`] of interval rows. Rows get a midpoint
//! time when both interval bounds are known; comparative series then pair
//! midpoints with one metric column per mode. Modes lacking a column or a time
//! axis are left out of that series rather than failing the batch.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::table::Table;
use crate::types::{Mode, ValidationError};

/// Column holding the interval start time.
pub const T_START: &str = "t_start";
/// Column holding the interval end time.
pub const T_END: &str = "t_end";

/// One interval row with its derived midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalRow {
    /// Cells in the owning series' column order.
    pub values: Vec<Option<f64>>,
    /// `(t_start + t_end) / 2`, when both bounds are present.
    pub mid: Option<f64>,
}

/// The interval rows of one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSeries {
    pub mode: Mode,
    pub columns: Vec<String>,
    pub rows: Vec<IntervalRow>,
}

impl RunSeries {
    /// Enriches a table's rows with midpoints.
    pub fn from_table(mode: Mode, table: Table) -> Self {
        let start = table.column(T_START);
        let end = table.column(T_END);
        let rows = table
            .rows
            .into_iter()
            .map(|values| {
                let bound = |idx: Option<usize>| idx.and_then(|i| values.get(i).copied().flatten());
                let mid = match (bound(start), bound(end)) {
                    (Some(s), Some(e)) => Some((s + e) / 2.0),
                    _ => None,
                };
                IntervalRow { values, mid }
            })
            .collect();
        Self {
            mode,
            columns: table.columns,
            rows,
        }
    }

    /// Whether the table carries both interval bound columns.
    pub fn has_time_axis(&self) -> bool {
        self.columns.iter().any(|c| c == T_START) && self.columns.iter().any(|c| c == T_END)
    }

    /// Value of `column` in `row`, if the column exists and the cell is set.
    pub fn value(&self, row: &IntervalRow, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        row.values.get(idx).copied().flatten()
    }

    /// `(mid, value)` pairs for rows that have both.
    pub fn points(&self, column: &str) -> Vec<SeriesPoint> {
        self.rows
            .iter()
            .filter_map(|row| {
                Some(SeriesPoint {
                    t: row.mid?,
                    value: self.value(row, column)?,
                })
            })
            .collect()
    }
}

/// Computes midpoints for every mode's table.
///
/// No cross-mode validation is done: disjoint time ranges and differing
/// column sets are all accepted.
pub fn align_runs(tables: BTreeMap<Mode, Table>) -> BTreeMap<Mode, RunSeries> {
    tables
        .into_iter()
        .map(|(mode, table)| {
            let series = RunSeries::from_table(mode.clone(), table);
            (mode, series)
        })
        .collect()
}

/// One plotted point of a comparative series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub t: f64,
    pub value: f64,
}

/// One mode's line in a comparative chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeSeries {
    pub mode: Mode,
    pub points: Vec<SeriesPoint>,
}

/// Collects `column` against midpoint time for every mode that has both.
///
/// Modes are returned in canonical order. An empty result means there is
/// nothing to plot for this column.
pub fn comparative_series(runs: &BTreeMap<Mode, RunSeries>, column: &str) -> Vec<ModeSeries> {
    runs.values()
        .filter(|run| run.has_time_axis() && run.columns.iter().any(|c| c == column))
        .map(|run| ModeSeries {
            mode: run.mode.clone(),
            points: run.points(column),
        })
        .collect()
}

/// The per-interval metrics compared across modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalMetric {
    PoolNow,
    TargetTot,
    RejectionRate,
    IdleMeanInterval,
}

impl IntervalMetric {
    pub const ALL: [Self; 4] = [
        Self::PoolNow,
        Self::TargetTot,
        Self::RejectionRate,
        Self::IdleMeanInterval,
    ];

    /// Column name in the interval summaries.
    pub const fn column(self) -> &'static str {
        match self {
            Self::PoolNow => "pool_now",
            Self::TargetTot => "target_tot",
            Self::RejectionRate => "rejection_rate",
            Self::IdleMeanInterval => "idle_mean_interval",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::PoolNow => "Pool over time",
            Self::TargetTot => "Target replicas over time",
            Self::RejectionRate => "Rejection rate per interval",
            Self::IdleMeanInterval => "Idle mean per interval",
        }
    }

    /// Base name of the rendered figure.
    pub const fn output_name(self) -> &'static str {
        match self {
            Self::PoolNow => "intervals_pool",
            Self::TargetTot => "intervals_target",
            Self::RejectionRate => "intervals_rej",
            Self::IdleMeanInterval => "intervals_idle",
        }
    }

    /// Builds the chart for this metric, or `None` when no mode can supply it.
    pub fn chart(self, runs: &BTreeMap<Mode, RunSeries>) -> Option<ComparativeChart> {
        let series = comparative_series(runs, self.column());
        if series.is_empty() {
            return None;
        }
        Some(ComparativeChart {
            title: self.title(),
            x_label: "time (s)",
            y_label: self.column(),
            series,
        })
    }
}

impl FromStr for IntervalMetric {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| ValidationError::UnknownMetric {
                value: s.to_string(),
            })
    }
}

/// A line chart overlaying one metric across modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparativeChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<ModeSeries>,
}

/// Headline service-level figures of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliSummary {
    pub mode: Mode,
    pub values: BTreeMap<String, Option<f64>>,
}

impl SliSummary {
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied().flatten()
    }
}

/// Takes the first row of each mode's SLI table, in canonical mode order.
///
/// Tables without rows are skipped.
pub fn summarize_sli(tables: &BTreeMap<Mode, Table>) -> Vec<SliSummary> {
    tables
        .iter()
        .filter_map(|(mode, table)| {
            let first = table.rows.first()?;
            let values = table
                .columns
                .iter()
                .cloned()
                .zip(first.iter().copied())
                .collect();
            Some(SliSummary {
                mode: mode.clone(),
                values,
            })
        })
        .collect()
}

/// The SLI figures compared across modes as bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliMetric {
    RejectionRate,
    IdleMean,
}

impl SliMetric {
    pub const ALL: [Self; 2] = [Self::RejectionRate, Self::IdleMean];

    pub const fn column(self) -> &'static str {
        match self {
            Self::RejectionRate => "rejection_rate",
            Self::IdleMean => "idle_mean",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::RejectionRate => "Rejection rate per mode",
            Self::IdleMean => "Idle mean per mode",
        }
    }

    pub const fn y_label(self) -> &'static str {
        match self {
            Self::RejectionRate => "Rejection rate",
            Self::IdleMean => "Idle mean (Pool)",
        }
    }

    pub const fn output_name(self) -> &'static str {
        match self {
            Self::RejectionRate => "sli_rejection_rate",
            Self::IdleMean => "sli_idle_mean",
        }
    }

    /// One bar per summary, `None` when there are no summaries.
    pub fn chart(self, summaries: &[SliSummary]) -> Option<BarChart> {
        if summaries.is_empty() {
            return None;
        }
        let bars = summaries
            .iter()
            .map(|s| Bar {
                mode: s.mode.clone(),
                value: s.value(self.column()),
            })
            .collect();
        Some(BarChart {
            title: self.title(),
            y_label: self.y_label(),
            bars,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub mode: Mode,
    pub value: Option<f64>,
}

/// A bar chart with one bar per mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<Bar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn table(csv: &str) -> Table {
        Table::parse(Cursor::new(csv)).unwrap()
    }

    fn mode(name: &str) -> Mode {
        Mode::new(name).unwrap()
    }

    #[test]
    fn midpoint_needs_both_bounds() {
        let series = RunSeries::from_table(
            mode("default"),
            table("t_start,t_end,pool_now\n10,20,3\n30,,4\n"),
        );

        assert_eq!(series.rows.len(), 2);
        assert_eq!(series.rows[0].mid, Some(15.0));
        assert_eq!(series.rows[1].mid, None);
        assert_eq!(series.value(&series.rows[1], "pool_now"), Some(4.0));
    }

    #[test]
    fn rows_without_midpoint_are_kept_but_not_plotted() {
        let runs = align_runs(BTreeMap::from([(
            mode("default"),
            table("t_start,t_end,pool_now\n10,20,3\n30,,4\n"),
        )]));
        let series = comparative_series(&runs, "pool_now");

        assert_eq!(runs[&mode("default")].rows.len(), 2);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points, [SeriesPoint { t: 15.0, value: 3.0 }]);
    }

    #[test]
    fn table_without_bound_columns_has_no_time_axis() {
        let series = RunSeries::from_table(mode("custom"), table("t_start,pool_now\n10,3\n"));
        assert!(!series.has_time_axis());
        assert_eq!(series.rows[0].mid, None);
    }

    #[test]
    fn modes_missing_a_column_are_skipped_silently() {
        let runs = align_runs(BTreeMap::from([
            (mode("default"), table("t_start,t_end,pool_now\n0,10,1\n")),
            (mode("custom"), table("t_start,t_end,target_tot\n0,10,2\n")),
            (mode("nofuture"), table("pool_now\n5\n")),
        ]));

        let pool = comparative_series(&runs, "pool_now");
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].mode, mode("default"));

        assert!(comparative_series(&runs, "idle_mean_interval").is_empty());
        assert!(IntervalMetric::IdleMeanInterval.chart(&runs).is_none());
    }

    #[test]
    fn series_follow_canonical_mode_order() {
        let runs = align_runs(BTreeMap::from([
            (mode("zeta"), table("t_start,t_end,pool_now\n0,10,1\n")),
            (mode("nofuture"), table("t_start,t_end,pool_now\n0,10,1\n")),
            (mode("default"), table("t_start,t_end,pool_now\n0,10,1\n")),
        ]));
        let chart = IntervalMetric::PoolNow.chart(&runs).unwrap();
        let modes: Vec<&str> = chart.series.iter().map(|s| s.mode.as_str()).collect();

        assert_eq!(modes, ["default", "nofuture", "zeta"]);
        assert_eq!(chart.title, "Pool over time");
        assert_eq!(chart.x_label, "time (s)");
    }

    #[test]
    fn disjoint_time_ranges_are_tolerated() {
        let runs = align_runs(BTreeMap::from([
            (mode("default"), table("t_start,t_end,pool_now\n0,10,1\n")),
            (mode("custom"), table("t_start,t_end,pool_now\n500,600,9\n")),
        ]));
        let series = comparative_series(&runs, "pool_now");
        assert_eq!(series[1].points, [SeriesPoint { t: 550.0, value: 9.0 }]);
    }

    #[test]
    fn metric_parses_from_column_name() {
        assert_eq!(
            "target_tot".parse::<IntervalMetric>().unwrap(),
            IntervalMetric::TargetTot
        );
        let err = "bogus".parse::<IntervalMetric>().unwrap_err();
        assert_eq!(err.to_string(), "unknown metric: bogus");
    }

    #[test]
    fn sli_takes_first_row_in_mode_order() {
        let tables = BTreeMap::from([
            (
                mode("nofuture"),
                table("total_time_s,rejections,rejection_rate,idle_mean\n300,4,0.02,1.5\n"),
            ),
            (
                mode("default"),
                table("total_time_s,rejections,rejection_rate,idle_mean\n300,9,0.05,0.5\n1,1,1,1\n"),
            ),
            (mode("custom"), table("total_time_s,rejections,rejection_rate,idle_mean\n")),
        ]);
        let summaries = summarize_sli(&tables);

        let modes: Vec<&str> = summaries.iter().map(|s| s.mode.as_str()).collect();
        assert_eq!(modes, ["default", "nofuture"]);
        assert_eq!(summaries[0].value("rejection_rate"), Some(0.05));

        let chart = SliMetric::IdleMean.chart(&summaries).unwrap();
        assert_eq!(chart.bars[1].value, Some(1.5));
        assert_eq!(chart.y_label, "Idle mean (Pool)");
    }

    #[test]
    fn sli_chart_without_summaries_is_none() {
        assert!(SliMetric::RejectionRate.chart(&[]).is_none());
    }
}
