//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "public/prep".into()
    }

    pub fn output() -> PathBuf {
        "public/manifest.json".into()
    }

    pub fn path_prefix() -> String {
        "/".into()
    }

    pub fn extensions() -> Vec<String> {
        vec!["md".into()]
    }
}

// ============================================================================
// [watch] Section Defaults
// ============================================================================

pub mod watch {
    pub fn debounce_ms() -> u64 {
        300
    }
}
