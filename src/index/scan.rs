//! Two-level content scan: topic directories, then markdown files in each.

use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// One topic directory and the markdown files directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTopic {
    /// Directory name, used verbatim as the topic id.
    pub name: String,
    /// Markdown file names, sorted.
    pub files: Vec<String>,
}

/// Scan `root` for topics.
///
/// Only immediate subdirectories are topics and only files directly inside a
/// topic are documents; deeper nesting is ignored. A missing root yields an
/// empty scan. Names that are not UTF-8 and entries that cannot be read are
/// skipped.
///
/// Hidden directories (`.git`, `.obsidian`, ...) are the one exception to
/// "one topic per subdirectory": they are never listed, and hidden files
/// are never documents.
///
/// Results are sorted by name so the same tree always scans the same way.
pub fn scan_content(root: &Path, extensions: &[String]) -> Vec<ScannedTopic> {
    if !root.is_dir() {
        return Vec::new();
    }

    children(root)
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| {
            let name = visible_name(&e)?;
            let files = scan_topic(e.path(), extensions);
            Some(ScannedTopic { name, files })
        })
        .collect()
}

/// List markdown files directly inside a topic directory.
fn scan_topic(dir: &Path, extensions: &[String]) -> Vec<String> {
    children(dir)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| visible_name(&e))
        .filter(|name| has_extension(name, extensions))
        .collect()
}

/// Immediate children of `dir`, sorted by file name, following symlinks.
fn children(dir: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
}

/// UTF-8 name of a non-hidden entry.
fn visible_name(entry: &DirEntry) -> Option<String> {
    entry
        .file_name()
        .to_str()
        .filter(|name| !name.starts_with('.'))
        .map(str::to_owned)
}

/// Whether `name` ends in one of `extensions` (case-insensitive, no dot).
fn has_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
