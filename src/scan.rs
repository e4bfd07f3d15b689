//! Notebook discovery.
//!
//! Stage 1 of the build. Walks the source directories under the project root
//! and collects every notebook file.
//!
//! ## Directory Structure
//!
//! ```text
//! project/
//! ├── notebook_metadata.yml            # Titles, descriptions, images (optional)
//! ├── site.toml                        # Site config (optional)
//! ├── apps/                            # Exported as read-only apps, code hidden
//! │   └── 2025-03-15-blog_intro.py
//! └── notebooks/                       # Exported as editable notebooks
//!     ├── 2025-03-20-duckdb_tour.py
//!     └── series/                      # Nested directories are scanned too
//!         └── 2025-04-01-part_one.py
//! ```
//!
//! Only `apps/` and `notebooks/` are scanned. A missing source directory is
//! not an error: it is recorded in [`Discovery::missing_dirs`] so the caller
//! can warn about it, and contributes no documents.
//!
//! The order of [`Discovery::documents`] carries no meaning; the index
//! imposes its own order later.

use crate::types::{Document, SOURCE_EXTENSION};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Everything discovery found, including what it had to skip.
#[derive(Debug, Default)]
pub struct Discovery {
    pub documents: Vec<Document>,
    /// Source directories that do not exist, as given.
    pub missing_dirs: Vec<PathBuf>,
    /// Entries that could not be read while walking.
    pub unreadable: Vec<String>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Scan `source_dirs` under `root` for notebooks.
pub fn discover(root: &Path, source_dirs: &[&str]) -> Discovery {
    let mut discovery = Discovery::default();

    for &dir in source_dirs {
        let dir_path = root.join(dir);
        if !dir_path.is_dir() {
            discovery.missing_dirs.push(dir_path);
            continue;
        }

        for entry in WalkDir::new(&dir_path).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    discovery.unreadable.push(e.to_string());
                    continue;
                }
            };
            let path = entry.path();
            if !is_notebook(path) {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
            discovery.documents.push(Document::new(relative, dir));
        }
    }

    discovery
}

fn is_notebook(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == SOURCE_EXTENSION)
}
