//! Notebook export.
//!
//! Stage 2 of the build. Each notebook is handed to an external renderer
//! that turns it into a self-contained HTML file.
//!
//! The [`Renderer`] trait is the only seam to the outside world. The
//! production implementation, [`MarimoRenderer`], runs
//! `marimo export html-wasm` as a subprocess:
//!
//! | Mode | Command |
//! |---|---|
//! | [`RenderMode::App`] | `marimo export html-wasm --mode run --no-show-code <src> -o <out>` |
//! | [`RenderMode::Edit`] | `marimo export html-wasm --mode edit <src> -o <out>` |
//!
//! ## Failure isolation
//!
//! [`export_document`] never returns an error. Whatever goes wrong (the output
//! directory cannot be created, the program is missing, it exits non-zero)
//! is captured in a failed [`ExportResult`] and the build moves on to the
//! next notebook.
//!
//! ## Output paths
//!
//! Artifacts mirror the source layout under the output root with the
//! extension swapped:
//!
//! ```text
//! apps/2025-03-15-blog_intro.py  →  _site/apps/2025-03-15-blog_intro.html
//! ```

use crate::types::{Document, ExportResult, RenderMode};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("renderer exited with {status}: {output}")]
    Failed { status: ExitStatus, output: String },
}

impl RenderError {
    /// Diagnostic shown to the user for a failed export.
    pub fn diagnostic(&self) -> String {
        match self {
            RenderError::Spawn { .. } => self.to_string(),
            RenderError::Failed { status, output } if output.trim().is_empty() => {
                format!("renderer exited with {status}")
            }
            RenderError::Failed { output, .. } => output.trim_end().to_string(),
        }
    }
}

/// Something that turns one notebook into one HTML file.
pub trait Renderer {
    /// Render `source` to `output`. The parent directory of `output` exists.
    fn render(&self, source: &Path, output: &Path, mode: RenderMode) -> Result<(), RenderError>;
}

/// Renders notebooks with the marimo CLI.
#[derive(Debug, Clone)]
pub struct MarimoRenderer {
    program: String,
}

impl MarimoRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to the program, excluding the program itself.
    pub fn args(source: &Path, output: &Path, mode: RenderMode) -> Vec<String> {
        let flags: &[&str] = match mode {
            RenderMode::App => &["--mode", "run", "--no-show-code"],
            RenderMode::Edit => &["--mode", "edit"],
        };
        let mut args: Vec<String> = ["export", "html-wasm"]
            .iter()
            .chain(flags)
            .map(|s| s.to_string())
            .collect();
        args.push(source.to_string_lossy().into_owned());
        args.push("-o".into());
        args.push(output.to_string_lossy().into_owned());
        args
    }
}

impl Renderer for MarimoRenderer {
    fn render(&self, source: &Path, output: &Path, mode: RenderMode) -> Result<(), RenderError> {
        let result = Command::new(&self.program)
            .args(Self::args(source, output, mode))
            .output()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if result.status.success() {
            return Ok(());
        }

        // marimo reports problems on stderr; fall back to stdout if it is silent
        let stderr = String::from_utf8_lossy(&result.stderr);
        let output = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&result.stdout).into_owned()
        } else {
            stderr.into_owned()
        };
        Err(RenderError::Failed {
            status: result.status,
            output,
        })
    }
}

/// Where the artifact for `document` is written.
pub fn artifact_path(output_dir: &Path, document: &Document) -> PathBuf {
    output_dir.join(document.artifact_relative_path())
}

/// Make sure the directory that will hold `output` exists.
pub fn prepare_output_path(output: &Path) -> std::io::Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Export one notebook.
///
/// `root` is the project root the document path is relative to. Never fails:
/// errors become a failed [`ExportResult`] carrying the diagnostic.
pub fn export_document(
    renderer: &impl Renderer,
    root: &Path,
    output_dir: &Path,
    document: &Document,
) -> ExportResult {
    let output = artifact_path(output_dir, document);

    if let Err(e) = prepare_output_path(&output) {
        let message = format!("could not create output directory for {}: {e}", output.display());
        return ExportResult::failed(document.clone(), output, message);
    }

    let source = root.join(&document.path);
    match renderer.render(&source, &output, document.mode) {
        Ok(()) => ExportResult::succeeded(document.clone(), output),
        Err(e) => ExportResult::failed(document.clone(), output, e.diagnostic()),
    }
}
