//! Notebook metadata: titles, descriptions and preview images.
//!
//! Metadata lives in a single optional YAML file (`notebook_metadata.yml`)
//! keyed by display key, i.e. the notebook file name without its date prefix
//! and extension:
//!
//! ```yaml
//! notebooks:
//!   blog_intro:
//!     title: "Welcome to the blog"
//!     description: "Why notebooks make good blog posts."
//!     image: "public/logo.png"
//! ```
//!
//! ## Resolution
//!
//! Every field is optional and resolved independently:
//!
//! - **Title**: configured title → titleized display key (`blog_intro` → "Blog Intro")
//! - **Description**: configured description → empty
//! - **Image**: configured image → empty
//!
//! Loading never fails the build. A missing file or a file that does not
//! parse leaves the store empty, and every notebook falls back to defaults.
//! The caller gets a [`MetadataLoad`] describing what happened so it can be
//! reported.

use crate::naming;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;

/// Metadata record for one notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetadataEntry {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
}

/// Top-level shape of the metadata file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetadataFile {
    notebooks: Option<BTreeMap<String, Option<MetadataEntry>>>,
}

/// Fully resolved metadata, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// What happened when loading the metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataLoad {
    Loaded { entries: usize },
    Missing,
    Invalid { error: String },
}

/// Read-only lookup from display key to metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    entries: BTreeMap<String, MetadataEntry>,
}

impl MetadataStore {
    /// Load the metadata file at `path`.
    ///
    /// Always yields a usable store; the [`MetadataLoad`] says whether the
    /// file was read, absent, or rejected.
    pub fn load(path: &Path) -> (Self, MetadataLoad) {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return (Self::default(), MetadataLoad::Missing);
            }
            Err(e) => {
                return (
                    Self::default(),
                    MetadataLoad::Invalid {
                        error: e.to_string(),
                    },
                );
            }
        };

        match Self::parse(&content) {
            Ok(store) => {
                let entries = store.len();
                (store, MetadataLoad::Loaded { entries })
            }
            Err(e) => (
                Self::default(),
                MetadataLoad::Invalid {
                    error: e.to_string(),
                },
            ),
        }
    }

    /// Parse metadata from YAML text.
    ///
    /// Empty documents and documents without a `notebooks` mapping yield an
    /// empty store. Merge keys (`<<`) are applied before entries are read.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut value: serde_yaml::Value = serde_yaml::from_str(content)?;
        // Entries may share fields through `<<: *anchor`
        value.apply_merge()?;
        let file: Option<MetadataFile> = serde_yaml::from_value(value)?;
        let entries = file
            .and_then(|f| f.notebooks)
            .unwrap_or_default()
            .into_iter()
            .map(|(key, entry)| (key, entry.unwrap_or_default()))
            .collect();
        Ok(Self { entries })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, MetadataEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, display_key: &str) -> Option<&MetadataEntry> {
        self.entries.get(display_key)
    }

    /// Resolve metadata for a display key, falling back to derived defaults.
    pub fn resolve(&self, display_key: &str) -> ResolvedMetadata {
        let entry = self.entries.get(display_key).cloned().unwrap_or_default();
        ResolvedMetadata {
            title: entry
                .title
                .unwrap_or_else(|| naming::titleize(display_key)),
            description: entry.description.unwrap_or_default(),
            image: entry.image.unwrap_or_default(),
        }
    }
}

/// Accept any YAML scalar as a string; `null` counts as absent.
///
/// Operators write `title: 2024` or `description: yes` without quoting, and
/// a single such value must not invalidate the whole file.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string, found {other:?}"
        ))),
    }
}
