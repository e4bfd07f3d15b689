//! Shared types passed between the build stages.
//!
//! A [`Document`] is created by discovery, exported once, and projected into
//! an [`IndexEntry`] for the index page. Nothing here outlives a build run.

use crate::naming::{self, ParsedName};
use std::path::{Path, PathBuf};

/// Source directory holding app-mode notebooks.
pub const APPS_DIR: &str = "apps";
/// Source directory holding edit-mode notebooks.
pub const NOTEBOOKS_DIR: &str = "notebooks";
/// Directories scanned for notebooks, in scan order.
pub const SOURCE_DIRS: &[&str] = &[NOTEBOOKS_DIR, APPS_DIR];

/// Extension of notebook sources.
pub const SOURCE_EXTENSION: &str = "py";
/// Extension of exported artifacts.
pub const ARTIFACT_EXTENSION: &str = "html";

/// How a notebook is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Read-only app, code hidden.
    App,
    /// Full notebook, code visible and editable.
    Edit,
}

impl RenderMode {
    /// Mode for documents found under `source_dir`.
    ///
    /// Only the apps directory produces apps; every other directory exports
    /// editable notebooks.
    pub fn for_source_dir(source_dir: &str) -> Self {
        if source_dir == APPS_DIR {
            RenderMode::App
        } else {
            RenderMode::Edit
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::App => "app",
            RenderMode::Edit => "notebook",
        }
    }
}

/// A discovered notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the project root, e.g. `apps/2025-03-15-blog_intro.py`.
    pub path: PathBuf,
    /// Top-level source directory the document was found in.
    pub source_dir: String,
    pub mode: RenderMode,
}

impl Document {
    pub fn new(path: PathBuf, source_dir: &str) -> Self {
        Self {
            path,
            source_dir: source_dir.to_string(),
            mode: RenderMode::for_source_dir(source_dir),
        }
    }

    /// File name including extension; the index sort key.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn name(&self) -> ParsedName {
        naming::parse_document_name(&self.path)
    }

    pub fn display_key(&self) -> String {
        self.name().display_key
    }

    /// Path of the exported artifact, relative to the output root.
    pub fn artifact_relative_path(&self) -> PathBuf {
        self.path.with_extension(ARTIFACT_EXTENSION)
    }

    /// Link target used on the index page, always `/`-separated.
    pub fn href(&self) -> String {
        url_path(&self.artifact_relative_path())
    }
}

/// Per-document outcome of invoking the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub document: Document,
    /// Where the artifact was (or would have been) written.
    pub output_path: PathBuf,
    pub success: bool,
    /// Captured diagnostic for failed exports.
    pub message: Option<String>,
}

impl ExportResult {
    pub fn succeeded(document: Document, output_path: PathBuf) -> Self {
        Self {
            document,
            output_path,
            success: true,
            message: None,
        }
    }

    pub fn failed(document: Document, output_path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            document,
            output_path,
            success: false,
            message: Some(message.into()),
        }
    }
}

/// A card on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub href: String,
    pub title: String,
    /// Empty when no description is configured.
    pub description: String,
    /// Empty when no image is configured.
    pub image: String,
}

/// Join path components with `/` regardless of platform.
fn url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
