//! CLI subcommand implementations.

pub mod export;
pub mod heatmap;
pub mod moves;
pub mod runs;
pub mod sli;
pub mod snapshots;
pub mod timeline;
