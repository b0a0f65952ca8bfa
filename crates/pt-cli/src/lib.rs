//! Command-line front end for phase trace analysis.
//!
//! Exposed as a library so commands can be driven from tests with an
//! in-memory writer.

mod cli;
pub mod commands;
mod config;
pub mod loader;

pub use cli::{Cli, Commands};
pub use config::Config;
