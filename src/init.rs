//! Project initialization.
//!
//! Writes a default `prepdex.toml` and creates the content root.

use crate::{build::rel, cli::Cli, config::IndexConfig, log};
use anyhow::{Context, Result, bail};
use std::fs;

/// Create the config file and content directory for a new project
pub fn init_project(cli: &Cli, config: &IndexConfig) -> Result<()> {
    if config.config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config.config_path.display()
        );
    }

    if let Some(parent) = config.config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(&IndexConfig::template(cli))?;
    fs::write(&config.config_path, content)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))?;
    log!("init"; "wrote {}", rel(&config.config_path, &config.root));

    fs::create_dir_all(&config.build.content)
        .with_context(|| format!("Failed to create {}", config.build.content.display()))?;
    log!("init"; "content root {}", rel(&config.build.content, &config.root));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("prepdex").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_init_writes_config_and_content_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = cli(&["--root", root, "-p", "/intprep", "init"]);
        let config = IndexConfig::load(&cli).unwrap();

        init_project(&cli, &config).unwrap();

        assert!(dir.path().join("public/prep").is_dir());
        let written = IndexConfig::from_path(&dir.path().join("prepdex.toml")).unwrap();
        assert_eq!(written.build.path_prefix, "/intprep");
        // Paths stay relative so the project can move
        assert_eq!(written.build.content, std::path::PathBuf::from("public/prep"));
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prepdex.toml"), "").unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = cli(&["--root", root, "init"]);
        let config = IndexConfig::load(&cli).unwrap();

        assert!(init_project(&cli, &config).is_err());
    }
}
