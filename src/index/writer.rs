//! Manifest serialization and atomic file replacement.

use super::{IndexError, Manifest};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// What `write_manifest` did with the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// New content was written.
    Written,
    /// The file already held identical bytes; left untouched.
    Unchanged,
}

/// Render the manifest as pretty-printed JSON with a trailing newline.
pub fn render_manifest(manifest: &Manifest) -> Result<String, IndexError> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

/// Write the manifest to `output`, replacing any previous file.
///
/// Parent directories are created as needed. The content goes to a hidden
/// sibling file first and is renamed over `output`, so readers see either the
/// old manifest or the new one. Identical content is not rewritten.
pub fn write_manifest(manifest: &Manifest, output: &Path) -> Result<WriteOutcome, IndexError> {
    let json = render_manifest(manifest)?;

    if fs::read(output).is_ok_and(|existing| existing == json.as_bytes()) {
        return Ok(WriteOutcome::Unchanged);
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IndexError::CreateDir(parent.to_path_buf(), e))?;
    }

    let tmp = temp_path(output);
    fs::write(&tmp, json.as_bytes()).map_err(|e| IndexError::Write(output.to_path_buf(), e))?;
    if let Err(e) = fs::rename(&tmp, output) {
        fs::remove_file(&tmp).ok();
        return Err(IndexError::Write(output.to_path_buf(), e));
    }

    Ok(WriteOutcome::Written)
}

/// `public/manifest.json` → `public/.manifest.json.tmp`
fn temp_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest".into());
    output.with_file_name(format!(".{name}.tmp"))
}
