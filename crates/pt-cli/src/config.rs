//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pt_core::{DEFAULT_DELIMITER, Vocabulary};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the trace and summary files.
    pub work_dir: PathBuf,
    /// Where `export` writes renderable documents, relative to `work_dir`.
    pub output_dir: PathBuf,
    /// File name of the event trace.
    pub trace_file: String,
    /// Glob (file name part) matching per-mode interval summaries.
    pub intervals_glob: String,
    /// Glob (file name part) matching per-mode SLI summaries.
    pub sli_glob: String,
    /// Separator between timestamp and event text in the trace.
    pub delimiter: char,
    /// Event grammar words.
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            output_dir: PathBuf::from("plots"),
            trace_file: "timeseries_debug.csv".to_string(),
            intervals_glob: "timeseries_intervals_*.csv".to_string(),
            sli_glob: "timeseries_sli_*.csv".to_string(),
            delimiter: DEFAULT_DELIMITER,
            vocabulary: Vocabulary::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file and with the
    /// working directory overridden.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(
        config_path: Option<&Path>,
        work_dir: Option<&Path>,
    ) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PT_*, nested keys joined by "__")
        figment = figment.merge(Env::prefixed("PT_").split("__"));

        if let Some(dir) = work_dir {
            figment = figment.merge(Serialized::default("work_dir", dir));
        }

        figment.extract()
    }

    pub fn trace_path(&self) -> PathBuf {
        self.work_dir.join(&self.trace_file)
    }

    /// Output directory; relative paths resolve against `work_dir`.
    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(&self.output_dir)
    }
}

/// Returns the platform-specific config directory for pt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("phase-trace"))
}
