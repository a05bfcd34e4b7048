//! Path helpers shared by config loading and the watcher.

use std::{
    env,
    path::{Path, PathBuf},
};

/// Normalize a path to absolute form for reliable comparison.
///
/// Existing paths are canonicalized. Paths that do not exist (yet, or any
/// more, as with a removed file reported by the watcher) are made absolute
/// against the nearest existing ancestor, so both forms compare equal.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    // Re-anchor the missing tail on the canonical form of the deepest existing ancestor
    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    while let Some(parent) = existing.parent() {
        if let Some(name) = existing.file_name() {
            tail.push(name.to_owned());
        }
        existing = parent;
        if let Ok(canonical) = existing.canonicalize() {
            return tail.iter().rev().fold(canonical, |acc, name| acc.join(name));
        }
    }

    absolute
}

/// Nearest ancestor of `path` (including itself) that exists on disk.
pub fn existing_ancestor(path: &Path) -> Option<&Path> {
    path.ancestors().find(|p| p.exists())
}
