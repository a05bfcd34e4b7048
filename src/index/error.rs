//! Index error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing the manifest file.
///
/// Scanning never fails (missing or unreadable content yields fewer topics),
/// so every variant here belongs to the output side.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to serialize manifest")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to create directory `{0}`")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to write manifest `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}
