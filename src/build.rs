//! Manifest build orchestration.
//!
//! ```text
//! build_index()
//!     │
//!     ├── scan_content()    ──► topic directories + markdown files
//!     ├── build_manifest()  ──► Topic/Item values with public paths
//!     └── write_manifest()  ──► prepdex output file (atomic replace)
//! ```

use crate::{
    config::IndexConfig,
    index::{WriteOutcome, build_manifest, scan_content, write_manifest},
    log,
};
use anyhow::{Context, Result, anyhow};
use std::path::Path;

/// Summary of one indexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub topics: usize,
    pub items: usize,
    pub outcome: WriteOutcome,
}

/// Scan the content root and write the manifest.
///
/// A missing content root produces an empty manifest; only output failures
/// are errors.
pub fn build_index(config: &IndexConfig) -> Result<BuildReport> {
    let build = &config.build;
    let content_name = config
        .content_name()
        .ok_or_else(|| anyhow!("content root `{}` has no name", build.content.display()))?;

    if !build.content.is_dir() {
        log!("index"; "{} not found, writing empty manifest", rel(&build.content, &config.root));
    }

    let scanned = scan_content(&build.content, &build.extensions);
    let manifest = build_manifest(&scanned, &build.path_prefix, content_name, &build.extensions);

    let outcome = write_manifest(&manifest, &build.output)
        .with_context(|| format!("Failed to write manifest to {}", build.output.display()))?;

    let report = BuildReport {
        topics: manifest.topics.len(),
        items: manifest.item_count(),
        outcome,
    };

    let output = rel(&build.output, &config.root);
    match outcome {
        WriteOutcome::Written => {
            log!("index"; "{} topics, {} documents → {output}", report.topics, report.items)
        }
        WriteOutcome::Unchanged => log!("index"; "{output} is up to date"),
    }

    Ok(report)
}

/// Format path relative to the project root for log display.
pub fn rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Manifest;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path, prefix: &str) -> IndexConfig {
        let mut config = IndexConfig::default();
        config.build.path_prefix = prefix.to_string();
        config.resolve_paths(root, Path::new("prepdex.toml"));
        config
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# notes\n").unwrap();
    }

    fn read_manifest(config: &IndexConfig) -> Manifest {
        serde_json::from_str(&fs::read_to_string(&config.build.output).unwrap()).unwrap()
    }

    #[test]
    fn test_end_to_end_sub_path() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "public/prep/DSA/binary-trees.md");
        let config = config_for(dir.path(), "/intprep");

        let report = build_index(&config).unwrap();
        let manifest = read_manifest(&config);

        assert_eq!(report.topics, 1);
        assert_eq!(report.items, 1);
        assert_eq!(manifest.topics.len(), 1);
        let topic = &manifest.topics[0];
        assert_eq!(topic.id, "DSA");
        assert_eq!(topic.items.len(), 1);
        assert_eq!(topic.items[0].title, "Binary Trees");
        assert_eq!(topic.items[0].path, "/intprep/prep/DSA/binary-trees.md");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_content_root_keeps_served_name() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "notes/guides/DSA/binary-trees.md");
        fs::create_dir_all(dir.path().join("public")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("notes/guides"), dir.path().join("public/prep"))
            .unwrap();
        let config = config_for(dir.path(), "/intprep");

        build_index(&config).unwrap();
        let manifest = read_manifest(&config);

        assert_eq!(manifest.topics[0].path, "/intprep/prep/DSA");
        assert_eq!(manifest.topics[0].items[0].path, "/intprep/prep/DSA/binary-trees.md");
    }

    #[test]
    fn test_missing_content_root_writes_empty_manifest() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path(), "/");

        let report = build_index(&config).unwrap();

        assert_eq!(report.topics, 0);
        assert_eq!(fs::read_to_string(&config.build.output).unwrap(), "[]\n");
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "public/prep/DSA/two-sum.md");
        touch(dir.path(), "public/prep/DSA/heap-sort.md");
        touch(dir.path(), "public/prep/backend/rate_limiting.md");
        let config = config_for(dir.path(), "/");

        assert_eq!(build_index(&config).unwrap().outcome, WriteOutcome::Written);
        let first = fs::read(&config.build.output).unwrap();

        assert_eq!(build_index(&config).unwrap().outcome, WriteOutcome::Unchanged);
        assert_eq!(fs::read(&config.build.output).unwrap(), first);
    }

    #[test]
    fn test_root_prefix_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "public/prep/backend/rate_limiting.md");
        let config = config_for(dir.path(), "/");

        build_index(&config).unwrap();
        let manifest = read_manifest(&config);

        let item = &manifest.topics[0].items[0];
        assert_eq!(item.title, "Rate Limiting");
        assert_eq!(item.path, "/prep/backend/rate_limiting.md");
        assert_eq!(manifest.topics[0].path, "/prep/backend");
    }

    #[test]
    fn test_new_document_is_picked_up() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "public/prep/DSA/heap.md");
        let config = config_for(dir.path(), "/");
        build_index(&config).unwrap();

        touch(dir.path(), "public/prep/DSA/trie.md");
        let report = build_index(&config).unwrap();

        assert_eq!(report.outcome, WriteOutcome::Written);
        assert_eq!(report.items, 2);
    }

    #[test]
    fn test_write_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "public/prep/DSA/heap.md");
        let mut config = config_for(dir.path(), "/");
        // Parent of the manifest is a regular file
        fs::write(dir.path().join("blocker"), "").unwrap();
        config.build.output = dir.path().join("blocker/manifest.json");

        let err = build_index(&config).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to write manifest"));
    }

    #[test]
    fn test_rel() {
        assert_eq!(
            rel(Path::new("/site/public/manifest.json"), Path::new("/site")),
            "public/manifest.json"
        );
        assert_eq!(rel(Path::new("/elsewhere/x"), Path::new("/site")), "/elsewhere/x");
    }
}
