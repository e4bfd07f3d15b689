//! Filename conventions for notebook documents.
//!
//! Notebooks are named `YYYY-MM-DD-name.py`. The date prefix drives ordering
//! on the index page (lexicographic order on file names is chronological
//! order), while the remaining name is the *display key* used for metadata
//! lookup and as the fallback title.
//!
//! - `2025-03-15-blog_intro.py` → base key `2025-03-15-blog_intro`,
//!   display key `blog_intro`, title "Blog Intro"
//! - `scratch.py` → base key `scratch`, display key `scratch`, title "Scratch"

use std::path::Path;

/// Result of parsing a notebook file name like `2025-03-15-blog_intro.py`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// File stem, extension removed.
    pub base_key: String,
    /// Base key with a leading `YYYY-MM-DD-` removed, if present.
    pub display_key: String,
}

/// Parse a document path into its base and display keys.
pub fn parse_document_name(path: &Path) -> ParsedName {
    let base_key = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let display_key = strip_date_prefix(&base_key).to_string();
    ParsedName {
        base_key,
        display_key,
    }
}

/// Remove a leading `YYYY-MM-DD-` date prefix.
///
/// Only the exact shape (four digits, dash, two digits, dash, two digits,
/// dash) is stripped. Anything else is returned unchanged:
/// - `"2025-03-15-blog_intro"` → `"blog_intro"`
/// - `"2025-3-15-blog_intro"` → unchanged
/// - `"2025-03-15"` → unchanged (no trailing dash)
pub fn strip_date_prefix(name: &str) -> &str {
    const SHAPE: &[u8] = b"dddd-dd-dd-";
    let bytes = name.as_bytes();
    if bytes.len() < SHAPE.len() {
        return name;
    }
    let matches = SHAPE.iter().zip(bytes).all(|(shape, b)| match shape {
        b'd' => b.is_ascii_digit(),
        _ => b == shape,
    });
    if matches { &name[SHAPE.len()..] } else { name }
}

/// Turn a display key into a human readable title.
///
/// Underscores become spaces and every word is capitalized: a cased letter
/// following an uncased character (space, digit, punctuation, CJK) is
/// uppercased and the rest are lowercased.
/// `"blog_intro"` → `"Blog Intro"`, `"DUCKDB_tour"` → `"Duckdb Tour"`.
pub fn titleize(key: &str) -> String {
    let mut title = String::with_capacity(key.len());
    let mut at_word_start = true;
    for c in key.replace('_', " ").chars() {
        if c.is_uppercase() || c.is_lowercase() {
            if at_word_start {
                title.extend(c.to_uppercase());
            } else {
                title.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            title.push(c);
            at_word_start = true;
        }
    }
    title
}
