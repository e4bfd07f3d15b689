//! CLI output formatting for build progress.
//!
//! # Output Format
//!
//! ```text
//! ==> Discovering notebooks
//! Warning: Directory not found: apps
//! Found 2 notebooks (0 apps, 2 notebooks)
//! ==> Exporting notebooks
//! Exporting notebooks/2025-03-20-duckdb_tour.py to _site/notebooks/2025-03-20-duckdb_tour.html as notebook
//! Exporting notebooks/2025-03-15-intro.py to _site/notebooks/2025-03-15-intro.html as notebook
//! Error exporting notebooks/2025-03-15-intro.py:
//!     MarimoError: cell 3 failed
//! ==> Generating index.html
//! Metadata file notebook_metadata.yml not found. Using default metadata.
//! Generated _site/index.html (2 cards)
//! Exported 1 of 2 notebooks (1 failed)
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` for testability; the
//! `print_*` wrappers write to stdout. Format functions are pure: no I/O,
//! no side effects.

use crate::metadata::MetadataLoad;
use crate::pipeline::{BuildEvent, BuildReport, BuildState};

/// `1 app`, `2 apps`.
fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

fn indent(text: &str) -> Vec<String> {
    text.lines().map(|line| format!("    {line}")).collect()
}

/// Format a single build event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::StageStarted(state) => match state {
            BuildState::Discovering => vec!["==> Discovering notebooks".to_string()],
            BuildState::Exporting => vec!["==> Exporting notebooks".to_string()],
            BuildState::Indexing => vec!["==> Generating index.html".to_string()],
            BuildState::Init | BuildState::Done | BuildState::Failed => vec![],
        },
        BuildEvent::MissingSourceDir { path } => {
            vec![format!("Warning: Directory not found: {}", path.display())]
        }
        BuildEvent::UnreadableEntry { error } => vec![format!("Warning: {error}")],
        BuildEvent::NoDocuments => vec!["No notebooks found!".to_string()],
        BuildEvent::Discovered { apps, notebooks } => vec![format!(
            "Found {} ({}, {})",
            plural(apps + notebooks, "notebook", "notebooks"),
            plural(*apps, "app", "apps"),
            plural(*notebooks, "notebook", "notebooks"),
        )],
        BuildEvent::ExportStarted {
            document,
            output_path,
        } => vec![format!(
            "Exporting {} to {} as {}",
            document.path.display(),
            output_path.display(),
            document.mode.label()
        )],
        BuildEvent::ExportFinished(result) if result.success => vec![],
        BuildEvent::ExportFinished(result) => {
            let mut lines = vec![format!("Error exporting {}:", result.document.path.display())];
            if let Some(message) = &result.message {
                lines.extend(indent(message));
            }
            lines
        }
        BuildEvent::MetadataLoaded { path, outcome } => match outcome {
            MetadataLoad::Loaded { entries } => vec![format!(
                "Metadata: {} from {}",
                plural(*entries, "entry", "entries"),
                path.display()
            )],
            MetadataLoad::Missing => vec![format!(
                "Metadata file {} not found. Using default metadata.",
                path.display()
            )],
            MetadataLoad::Invalid { error } => vec![format!(
                "Error loading metadata file {}: {error}",
                path.display()
            )],
        },
        BuildEvent::IndexWritten { path, cards } => vec![format!(
            "Generated {} ({})",
            path.display(),
            plural(*cards, "card", "cards")
        )],
    }
}

/// Format the closing summary of a build.
///
/// Builds that found no notebooks have already said so; they get no summary.
pub fn format_build_summary(report: &BuildReport) -> Vec<String> {
    if report.state != BuildState::Done {
        return vec![];
    }
    let total = report.results.len();
    let failed: Vec<_> = report.failed_exports().collect();
    let mut lines = vec![format!(
        "Exported {} of {} notebooks ({} failed)",
        report.succeeded(),
        total,
        failed.len()
    )];
    for result in failed {
        lines.push(format!("    {}", result.document.path.display()));
    }
    lines
}

/// Print a build event to stdout.
pub fn print_build_event(event: &BuildEvent) {
    for line in format_build_event(event) {
        println!("{}", line);
    }
}

/// Print the build summary to stdout.
pub fn print_build_summary(report: &BuildReport) {
    for line in format_build_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
