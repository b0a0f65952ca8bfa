//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Phase/pool simulation trace analysis.
///
/// Reconstructs occupancy snapshots and phase movements from a simulation
/// trace, and lines up per-mode interval summaries for comparison.
#[derive(Debug, Parser)]
#[command(name = "pt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the trace and summary files.
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List phase occupancy snapshots taken at arrivals.
    Snapshots {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List movements between phases and into the pool.
    Moves {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the phase occupancy matrix over arrivals.
    Heatmap {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show movements grouped by adjacent phase pair.
    Timeline {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare per-interval metrics across modes.
    Runs {
        /// Only this metric (pool_now, target_tot, rejection_rate, idle_mean_interval).
        #[arg(short, long)]
        metric: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare headline service-level figures across modes.
    Sli {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write every renderable view as a JSON document.
    Export {
        /// Output directory (defaults to the configured one).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
