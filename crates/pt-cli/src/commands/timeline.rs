//! Timeline command for movements grouped by adjacent pair.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use pt_core::{TransitionBuckets, bucket_transitions};

use crate::Config;
use crate::loader::load_analysis;

/// Renders one line per canonical pair with its member timestamps.
pub fn format_timeline(buckets: &TransitionBuckets) -> String {
    let mut output = String::new();
    writeln!(output, "PHASE MOVES ({} total)", buckets.total()).unwrap();
    for bucket in &buckets.buckets {
        let times: Vec<String> = bucket
            .timestamps
            .iter()
            .map(|t| format!("{t:.3}"))
            .collect();
        let line = format!(
            "{:<8}  (n={})  {}",
            bucket.label,
            bucket.count,
            times.join(" ")
        );
        writeln!(output, "{}", line.trim_end()).unwrap();
    }
    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let analysis = load_analysis(config);
    let buckets = bucket_transitions(&analysis.moves);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&buckets)?)?;
    } else {
        write!(writer, "{}", format_timeline(&buckets))?;
    }
    Ok(())
}
