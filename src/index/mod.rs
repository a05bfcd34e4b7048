//! Content indexing: filesystem scan → manifest value → manifest file.
//!
//! ```text
//! scan_content()          build_manifest()          write_manifest()
//!  content root  ──────▶  [ScannedTopic]  ──────▶  Manifest  ──────▶  manifest.json
//!  (read-only)              (pure)                   (pure)            (atomic replace)
//! ```
//!
//! Only the two ends touch the filesystem; everything in between is a pure
//! function of the directory listing, which is what makes repeated builds
//! byte-identical.

mod error;
mod manifest;
mod scan;
mod title;
mod writer;

pub use error::IndexError;
pub use manifest::{Item, Manifest, Topic, build_manifest};
pub use scan::scan_content;
pub use writer::{WriteOutcome, write_manifest};
