//! Navigation manifest model and the pure builder that produces it.

use super::{
    scan::ScannedTopic,
    title::{normalize_title, title_case},
};
use serde::{Deserialize, Serialize};

/// One markdown document within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// Public URL path of the raw markdown file.
    pub path: String,
}

/// One topic directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Directory name, used by the front-end as a route parameter.
    pub id: String,
    pub title: String,
    /// Public base path of the topic's documents.
    pub path: String,
    pub items: Vec<Item>,
}

/// Ordered list of topics; serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub topics: Vec<Topic>,
}

impl Manifest {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Total number of documents across all topics.
    pub fn item_count(&self) -> usize {
        self.topics.iter().map(|t| t.items.len()).sum()
    }
}

/// Normalize a site path prefix.
///
/// Root hosting (`/` or empty) becomes the empty string so joined paths never
/// start with `//`. Any other prefix gets exactly one leading slash and no
/// trailing slash.
///
/// | Input       | Output     |
/// |-------------|------------|
/// | `/`         | ``         |
/// | `/intprep`  | `/intprep` |
/// | `intprep/`  | `/intprep` |
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Build the manifest from a scan.
///
/// Paths take the form `{prefix}/{content_name}/{topic}/{file}`, where
/// `content_name` is the content root's directory name as served by the site.
/// Item titles are derived from file names with any of `extensions` removed.
pub fn build_manifest(
    scanned: &[ScannedTopic],
    prefix: &str,
    content_name: &str,
    extensions: &[String],
) -> Manifest {
    let base = format!("{}/{content_name}", normalize_prefix(prefix));

    let topics = scanned
        .iter()
        .map(|topic| {
            let topic_path = format!("{base}/{}", topic.name);
            let items = topic
                .files
                .iter()
                .map(|file| Item {
                    title: title_case(strip_extension(file, extensions)),
                    path: format!("{topic_path}/{file}"),
                })
                .collect();

            Topic {
                id: topic.name.clone(),
                title: normalize_title(&topic.name),
                path: topic_path,
                items,
            }
        })
        .collect();

    Manifest { topics }
}

/// Drop the one configured extension that made `file` a document.
fn strip_extension<'a>(file: &'a str, extensions: &[String]) -> &'a str {
    match file.rsplit_once('.') {
        Some((stem, ext)) if extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) => stem,
        _ => file,
    }
}
