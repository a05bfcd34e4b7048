//! Display titles derived from file and directory names.

/// Extensions stripped before a name is turned into a title.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Word separators used in content file and directory names.
const SEPARATORS: [char; 2] = ['-', '_'];

/// Convert a raw file or directory name into a display title.
///
/// Strips a markdown extension, splits on `-`/`_`, and capitalizes every
/// word (first character upper case, the rest lower case). Acronyms are not
/// special-cased, so `DSA` becomes `Dsa`. Runs of separators produce empty
/// words and therefore repeated spaces.
///
/// | Input                     | Title                  |
/// |---------------------------|------------------------|
/// | `two-sum.md`              | `Two Sum`              |
/// | `breadth_first_search.md` | `Breadth First Search` |
/// | `DSA`                     | `Dsa`                  |
pub fn normalize_title(raw: &str) -> String {
    title_case(strip_markdown_extension(raw))
}

/// Capitalize the `-`/`_` separated words of a name that has no extension
/// left to strip.
pub fn title_case(name: &str) -> String {
    name.split(SEPARATORS)
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove a trailing `.md`/`.markdown` (any case), leaving other dots alone.
fn strip_markdown_extension(raw: &str) -> &str {
    match raw.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && MARKDOWN_EXTENSIONS
                    .iter()
                    .any(|md| md.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => raw,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
