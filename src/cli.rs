//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Markdown content indexer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content root directory (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Manifest output path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Public path prefix the site is served from (e.g. `/intprep`)
    #[arg(short, long = "path-prefix")]
    pub path_prefix: Option<String>,

    /// Config file name (default: prepdex.toml)
    #[arg(short = 'C', long, default_value = "prepdex.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default config file and create the content directory
    Init,

    /// Scan the content root and write the manifest once
    Build,

    /// Build, then rebuild the manifest whenever the content root changes
    Watch {
        /// Debounce window in milliseconds
        #[arg(short, long)]
        debounce: Option<u64>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "prepdex",
            "--root",
            "site",
            "-c",
            "public/prep",
            "-p",
            "/intprep",
            "build",
        ])
        .unwrap();

        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.content, Some(PathBuf::from("public/prep")));
        assert_eq!(cli.path_prefix.as_deref(), Some("/intprep"));
        assert_eq!(cli.config, PathBuf::from("prepdex.toml"));
        assert!(matches!(cli.command, Commands::Build));
        assert!(!cli.is_init());
    }

    #[test]
    fn test_parse_watch_debounce() {
        let cli = Cli::try_parse_from(["prepdex", "watch", "--debounce", "50"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch { debounce: Some(50) }));
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["prepdex", "-C", "custom.toml", "init"]).unwrap();
        assert!(cli.is_init());
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["prepdex"]).is_err());
    }
}
