//! Core extraction logic for phase/pool simulation traces.
//!
//! This crate contains the fundamental types and logic for:
//! - Line parsing: splitting timestamped trace lines
//! - Extraction: arrival snapshots and phase movements from free-text events
//! - Alignment: per-mode interval summaries on a shared time axis
//! - Projection: heatmap matrices and transition timelines ready to render

pub mod align;
pub mod grammar;
pub mod line;
pub mod project;
pub mod snapshot;
pub mod table;
pub mod trace;
pub mod transition;
pub mod types;

pub use align::{
    Bar, BarChart, ComparativeChart, IntervalMetric, ModeSeries, RunSeries, SeriesPoint, SliMetric,
    SliSummary, align_runs, comparative_series, summarize_sli,
};
pub use grammar::{MovePatterns, Vocabulary};
pub use line::{DEFAULT_DELIMITER, RawLine, parse_line};
pub use project::{
    OccupancyMatrix, TransitionBucket, TransitionBuckets, bucket_transitions, occupancy_matrix,
};
pub use snapshot::{ArrivalSnapshot, extract_snapshots};
pub use table::{Table, TableError};
pub use trace::{TraceAnalysis, TraceRead, read_trace};
pub use transition::{MoveEvent, extract_moves};
pub use types::{Mode, PhaseId, UnknownPhase, ValidationError};
