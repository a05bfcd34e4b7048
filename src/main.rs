//! prepdex - navigation manifest generator for markdown study guides.

mod build;
mod cli;
mod config;
mod index;
mod init;
mod logger;
mod utils;
mod watch;

use anyhow::Result;
use build::build_index;
use clap::Parser;
use cli::{Cli, Commands};
use config::IndexConfig;
use init::init_project;
use watch::watch_for_changes;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = IndexConfig::load(&cli)?;

    match &cli.command {
        Commands::Init => init_project(&cli, &config),
        Commands::Build => build_index(&config).map(|_| ()),
        Commands::Watch { .. } => {
            // A broken first build should not keep the watcher from starting
            if let Err(e) = build_index(&config) {
                log!("error"; "{e:#}");
            }
            watch_for_changes(&cli, config)
        }
    }
}
