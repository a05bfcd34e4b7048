//! `[build]` section configuration.
//!
//! Contains the paths and filters used to produce the manifest.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in prepdex.toml - indexing configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "public/prep"          # Topic directories live here
/// output = "public/manifest.json"  # Manifest fetched by the front-end
/// path_prefix = "/intprep"         # Site is hosted under a sub-path
/// extensions = ["md", "markdown"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Content root; each immediate subdirectory is a topic.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Manifest output file.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Public path the site is served from (`/` for root hosting).
    #[serde(default = "defaults::build::path_prefix")]
    #[educe(Default = defaults::build::path_prefix())]
    pub path_prefix: String,

    /// File extensions treated as markdown documents (without the dot).
    #[serde(default = "defaults::build::extensions")]
    #[educe(Default = defaults::build::extensions())]
    pub extensions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::super::IndexConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config() {
        let config = r#"
            [build]
            content = "docs"
            output = "dist/index.json"
            path_prefix = "/intprep"
            extensions = ["md", "markdown"]
        "#;
        let config: IndexConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("docs"));
        assert_eq!(config.build.output, PathBuf::from("dist/index.json"));
        assert_eq!(config.build.path_prefix, "/intprep");
        assert_eq!(config.build.extensions, vec!["md", "markdown"]);
    }

    #[test]
    fn test_build_config_defaults() {
        let config: IndexConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.content, PathBuf::from("public/prep"));
        assert_eq!(config.build.output, PathBuf::from("public/manifest.json"));
        assert_eq!(config.build.path_prefix, "/");
        assert_eq!(config.build.extensions, vec!["md"]);
    }

    #[test]
    fn test_partial_build_config_keeps_other_defaults() {
        let config: IndexConfig = toml::from_str("[build]\npath_prefix = \"/sub\"").unwrap();

        assert_eq!(config.build.path_prefix, "/sub");
        assert_eq!(config.build.content, PathBuf::from("public/prep"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<IndexConfig, _> = toml::from_str("[build]\nminify = true");
        assert!(result.is_err());
    }
}
