//! Indexer configuration management for `prepdex.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[build]`   | Content root, manifest path, prefix, extensions  |
//! | `[watch]`   | Change watcher settings (debounce window)        |
//!
//! The file is optional: without it every field takes its default, so a
//! project that keeps its content under `public/prep` builds with no setup.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "public/prep"
//! output = "public/manifest.json"
//! path_prefix = "/intprep"
//!
//! [watch]
//! debounce_ms = 300
//! ```

mod build;
pub mod defaults;
mod error;
mod watch;

pub use build::BuildConfig;
pub use error::ConfigError;
pub use watch::WatchConfig;

use crate::cli::{Cli, Commands};
use crate::utils::path::normalize_path;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing prepdex.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Content root name as configured, before symlinks are resolved
    #[serde(skip)]
    content_name: Option<String>,

    /// Indexing settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Change watcher settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl IndexConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, override and validate configuration for a CLI invocation.
    ///
    /// A missing config file is not an error: defaults apply.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.resolve_paths(root, &cli.config);

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Defaults with CLI overrides applied and paths left as written.
    ///
    /// This is what `init` serializes into a new config file.
    pub fn template(cli: &Cli) -> Self {
        let mut config = Self::default();
        config.update_with_cli(cli);
        config
    }

    /// Apply CLI overrides on top of file values
    fn update_with_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.path_prefix, cli.path_prefix.as_ref());

        if let Commands::Watch { debounce } = &cli.command {
            Self::update_option(&mut self.watch.debounce_ms, debounce.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Make root, config, content and output paths absolute.
    pub fn resolve_paths(&mut self, root: &Path, config_name: &Path) {
        let root = normalize_path(root);
        self.config_path = normalize_path(&root.join(config_name));

        // Canonicalizing follows symlinks; the public name is the one the site serves
        let configured = root.join(&self.build.content);
        self.build.content = normalize_path(&configured);
        self.content_name = configured
            .file_name()
            .or_else(|| self.build.content.file_name())
            .and_then(|name| name.to_str())
            .map(str::to_owned);

        self.build.output = normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    /// Name of the content root directory, as it appears in public paths.
    ///
    /// `/site/public/prep` → `prep`, even when `prep` links elsewhere.
    /// `None` until paths are resolved.
    pub fn content_name(&self) -> Option<&str> {
        self.content_name.as_deref()
    }

    /// Validate configuration values that serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.build.extensions.is_empty() {
            bail!(ConfigError::Validation(
                "[build.extensions] must have at least one element".into()
            ));
        }

        if self
            .build
            .extensions
            .iter()
            .any(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            bail!(ConfigError::Validation(
                "[build.extensions] entries must be non-empty and written without a leading dot"
                    .into()
            ));
        }

        if self.content_name().is_none() {
            bail!(ConfigError::Validation(format!(
                "[build.content] `{}` has no usable directory name",
                self.build.content.display()
            )));
        }

        if self.build.output.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[build.output] `{}` is a directory, expected a file path",
                self.build.output.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
