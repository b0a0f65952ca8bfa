use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pt_cli::commands::{export, heatmap, moves, runs, sli, snapshots, timeline};
use pt_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref(), cli.dir.as_deref())
        .context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match command {
        Commands::Snapshots { json } => snapshots::run(&mut stdout, &config, *json)?,
        Commands::Moves { json } => moves::run(&mut stdout, &config, *json)?,
        Commands::Heatmap { json } => heatmap::run(&mut stdout, &config, *json)?,
        Commands::Timeline { json } => timeline::run(&mut stdout, &config, *json)?,
        Commands::Runs { metric, json } => {
            runs::run(&mut stdout, &config, metric.as_deref(), *json)?;
        }
        Commands::Sli { json } => sli::run(&mut stdout, &config, *json)?,
        Commands::Export { out } => export::run(&mut stdout, &config, out.as_deref())?,
    }
    stdout.flush()?;

    Ok(())
}
