//! Build orchestration: discover → export → index.
//!
//! A build moves through a fixed sequence of states:
//!
//! ```text
//! Init → Discovering → Exporting → Indexing → Done
//!             │
//!             └─ no notebooks ─→ Failed
//! ```
//!
//! `Failed` is only reachable from discovery, when no notebook exists in any
//! source directory. Nothing is written in that case. Every other problem is
//! absorbed where it happens:
//!
//! - a missing source directory is a warning
//! - a notebook that fails to export is reported once and still gets a card
//!   (its link may be dead)
//! - a missing or broken metadata file means default titles
//!
//! The one exception is writing `index.html`: without it there is no site, so
//! that failure is returned as a [`BuildError`].
//!
//! Progress is reported as [`BuildEvent`]s over an optional channel. The
//! build itself never prints.

use crate::config::SiteConfig;
use crate::export::{Renderer, artifact_path, export_document};
use crate::generate;
use crate::metadata::{MetadataLoad, MetadataStore};
use crate::scan;
use crate::types::{Document, ExportResult, IndexEntry, RenderMode, SOURCE_DIRS};
use std::cmp::Reverse;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("failed to write index at {path}: {source}")]
    Index {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Inputs to a build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project root holding the source directories and metadata file.
    pub root: PathBuf,
    /// Where artifacts and `index.html` go.
    pub output_dir: PathBuf,
    pub config: SiteConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Init,
    Discovering,
    Exporting,
    Indexing,
    Done,
    Failed,
}

/// Progress notifications emitted while building.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    StageStarted(BuildState),
    MissingSourceDir {
        path: PathBuf,
    },
    UnreadableEntry {
        error: String,
    },
    NoDocuments,
    Discovered {
        apps: usize,
        notebooks: usize,
    },
    ExportStarted {
        document: Document,
        output_path: PathBuf,
    },
    ExportFinished(ExportResult),
    MetadataLoaded {
        path: PathBuf,
        outcome: MetadataLoad,
    },
    IndexWritten {
        path: PathBuf,
        cards: usize,
    },
}

/// What a build did.
#[derive(Debug)]
pub struct BuildReport {
    /// `Done`, or `Failed` when no notebooks were found.
    pub state: BuildState,
    /// One result per notebook, in index order.
    pub results: Vec<ExportResult>,
    pub index_path: Option<PathBuf>,
}

impl BuildReport {
    pub fn failed_exports(&self) -> impl Iterator<Item = &ExportResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}

/// Run a full build.
pub fn build(
    options: &BuildOptions,
    renderer: &impl Renderer,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    let mut run = Run {
        state: BuildState::Init,
        events,
    };

    run.enter(BuildState::Discovering);
    let discovery = scan::discover(&options.root, SOURCE_DIRS);
    for path in discovery.missing_dirs {
        run.emit(BuildEvent::MissingSourceDir { path });
    }
    for error in discovery.unreadable {
        run.emit(BuildEvent::UnreadableEntry { error });
    }
    if discovery.documents.is_empty() {
        run.state = BuildState::Failed;
        run.emit(BuildEvent::NoDocuments);
        return Ok(run.report(Vec::new(), None));
    }

    let mut documents = discovery.documents;
    sort_documents(&mut documents);
    let (apps, notebooks) = count_by_mode(&documents);
    run.emit(BuildEvent::Discovered { apps, notebooks });

    run.enter(BuildState::Exporting);
    let mut results = Vec::with_capacity(documents.len());
    for document in &documents {
        run.emit(BuildEvent::ExportStarted {
            document: document.clone(),
            output_path: artifact_path(&options.output_dir, document),
        });
        let result = export_document(renderer, &options.root, &options.output_dir, document);
        run.emit(BuildEvent::ExportFinished(result.clone()));
        results.push(result);
    }

    run.enter(BuildState::Indexing);
    let metadata_path = options.root.join(&options.config.metadata_file);
    let (store, outcome) = MetadataStore::load(&metadata_path);
    run.emit(BuildEvent::MetadataLoaded {
        path: metadata_path,
        outcome,
    });

    let entries = index_entries(&documents, &store);
    let index_path = generate::write_index(&options.output_dir, &entries, &options.config)
        .map_err(|source| BuildError::Index {
            path: options.output_dir.join(generate::INDEX_FILE),
            source,
        })?;
    run.emit(BuildEvent::IndexWritten {
        path: index_path.clone(),
        cards: entries.len(),
    });

    run.enter(BuildState::Done);
    Ok(run.report(results, Some(index_path)))
}

/// Order documents for the index: newest first.
///
/// Sorts by file name, descending. Names start with `YYYY-MM-DD`, so this is
/// reverse chronological order. Identical file names in different directories
/// are ordered by full path, also descending.
pub fn sort_documents(documents: &mut [Document]) {
    documents.sort_by_key(|d| Reverse((d.file_name(), d.path.clone())));
}

/// Project documents into index cards, one per document, in the given order.
pub fn index_entries(documents: &[Document], store: &MetadataStore) -> Vec<IndexEntry> {
    documents
        .iter()
        .map(|doc| {
            let meta = store.resolve(&doc.display_key());
            IndexEntry {
                href: doc.href(),
                title: meta.title,
                description: meta.description,
                image: meta.image,
            }
        })
        .collect()
}

/// Count documents per render mode, `(apps, notebooks)`.
pub fn count_by_mode(documents: &[Document]) -> (usize, usize) {
    let apps = documents
        .iter()
        .filter(|d| d.mode == RenderMode::App)
        .count();
    (apps, documents.len() - apps)
}

struct Run {
    state: BuildState,
    events: Option<Sender<BuildEvent>>,
}

impl Run {
    fn enter(&mut self, state: BuildState) {
        self.state = state;
        self.emit(BuildEvent::StageStarted(state));
    }

    fn emit(&self, event: BuildEvent) {
        if let Some(tx) = &self.events {
            // A dropped receiver only means nobody is listening
            tx.send(event).ok();
        }
    }

    fn report(&self, results: Vec<ExportResult>, index_path: Option<PathBuf>) -> BuildReport {
        BuildReport {
            state: self.state,
            results,
            index_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::MockRenderer;
    use crate::metadata::MetadataEntry;
    use crate::test_helpers::*;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn doc(path: &str) -> Document {
        let source_dir = path.split('/').next().unwrap();
        Document::new(PathBuf::from(path), source_dir)
    }

    #[test]
    fn sort_is_descending_by_file_name() {
        let mut docs = vec![
            doc("notebooks/2025-03-15-a.py"),
            doc("apps/2025-03-20-b.py"),
            doc("notebooks/2024-12-31-c.py"),
        ];
        sort_documents(&mut docs);
        let names: Vec<String> = docs.iter().map(|d| d.file_name()).collect();
        assert_eq!(
            names,
            vec!["2025-03-20-b.py", "2025-03-15-a.py", "2024-12-31-c.py"]
        );
    }

    #[test]
    fn sort_ignores_directory() {
        // "notebooks/z/..." would sort before "apps/..." by full path
        let mut docs = vec![doc("notebooks/z/2025-01-01-old.py"), doc("apps/2025-06-01-new.py")];
        sort_documents(&mut docs);
        assert_eq!(docs[0].file_name(), "2025-06-01-new.py");
    }

    #[test]
    fn sort_ties_are_independent_of_input_order() {
        let a = doc("apps/2025-01-01-same.py");
        let b = doc("notebooks/2025-01-01-same.py");
        let mut first = vec![a.clone(), b.clone()];
        let mut second = vec![b, a];
        sort_documents(&mut first);
        sort_documents(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn index_entries_resolve_metadata() {
        let docs = vec![doc("apps/2025-03-15-blog_intro.py"), doc("notebooks/2025-03-20-tour.py")];
        let store = MetadataStore::from_entries([(
            "blog_intro".to_string(),
            MetadataEntry {
                title: Some("Hello World".to_string()),
                ..MetadataEntry::default()
            },
        )]);
        let entries = index_entries(&docs, &store);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Hello World");
        assert_eq!(entries[0].href, "apps/2025-03-15-blog_intro.html");
        assert_eq!(entries[0].description, "");
        assert_eq!(entries[1].title, "Tour");
    }

    #[test]
    fn count_by_mode_splits_apps_and_notebooks() {
        let docs = vec![doc("apps/a.py"), doc("notebooks/b.py"), doc("notebooks/c.py")];
        assert_eq!(count_by_mode(&docs), (1, 2));
    }

    #[test]
    fn build_fixture_project() {
        let tmp = setup_project();
        let options = options_for(&tmp);
        let renderer = MockRenderer::new();

        let report = build(&options, &renderer, None).unwrap();

        assert_eq!(report.state, BuildState::Done);
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.succeeded(), 3);
        let html = read_index(&options);
        assert_eq!(card_titles(&html), vec!["Part One", "A Tour of DuckDB", "Hello World"]);
    }

    #[test]
    fn build_exports_each_document_once_with_its_mode() {
        let tmp = setup_project();
        let options = options_for(&tmp);
        let renderer = MockRenderer::new();

        build(&options, &renderer, None).unwrap();

        let calls = renderer.get_calls();
        assert_eq!(calls.len(), 3);
        for call in &calls {
            let is_app = call.source.starts_with(tmp.path().join("apps"));
            let expected = if is_app { RenderMode::App } else { RenderMode::Edit };
            assert_eq!(call.mode, expected, "{}", call.source.display());
        }
    }

    #[test]
    fn failed_export_still_gets_a_card() {
        let tmp = setup_project();
        let options = options_for(&tmp);
        let renderer = MockRenderer::failing(&["blog_intro"]);

        let report = build(&options, &renderer, None).unwrap();

        assert_eq!(report.state, BuildState::Done);
        assert_eq!(report.failed_exports().count(), 1);
        assert_eq!(report.succeeded(), 2);
        let html = read_index(&options);
        assert_eq!(card_titles(&html).len(), 3);
        assert!(html.contains(r#"href="apps/2025-03-15-blog_intro.html""#));
        assert!(
            !options
                .output_dir
                .join("apps/2025-03-15-blog_intro.html")
                .exists()
        );
    }

    #[test]
    fn no_documents_fails_without_output() {
        let tmp = TempDir::new().unwrap();
        let options = options_for(&tmp);
        let renderer = MockRenderer::new();

        let report = build(&options, &renderer, None).unwrap();

        assert_eq!(report.state, BuildState::Failed);
        assert!(report.results.is_empty());
        assert!(report.index_path.is_none());
        assert!(!options.output_dir.exists());
        assert!(renderer.get_calls().is_empty());
    }

    #[test]
    fn missing_apps_dir_builds_notebooks_only() {
        let tmp = setup_project();
        fs::remove_dir_all(tmp.path().join("apps")).unwrap();
        let options = options_for(&tmp);
        let (tx, rx) = mpsc::channel();

        let report = build(&options, &MockRenderer::new(), Some(tx)).unwrap();

        assert_eq!(report.state, BuildState::Done);
        assert!(report.results.iter().all(|r| r.document.source_dir == "notebooks"));
        let events: Vec<BuildEvent> = rx.iter().collect();
        assert!(events.iter().any(|e| matches!(
            e,
            BuildEvent::MissingSourceDir { path } if path.ends_with("apps")
        )));
        assert_eq!(card_titles(&read_index(&options)).len(), 2);
    }

    #[test]
    fn missing_metadata_uses_defaults() {
        let tmp = setup_project();
        fs::remove_file(tmp.path().join("notebook_metadata.yml")).unwrap();
        let options = options_for(&tmp);
        let (tx, rx) = mpsc::channel();

        build(&options, &MockRenderer::new(), Some(tx)).unwrap();

        let html = read_index(&options);
        assert_eq!(card_titles(&html), vec!["Part One", "Duckdb Tour", "Blog Intro"]);
        assert!(rx.iter().any(|e| matches!(
            e,
            BuildEvent::MetadataLoaded {
                outcome: MetadataLoad::Missing,
                ..
            }
        )));
    }

    #[test]
    fn states_are_entered_in_order() {
        let tmp = setup_project();
        let options = options_for(&tmp);
        let (tx, rx) = mpsc::channel();

        build(&options, &MockRenderer::new(), Some(tx)).unwrap();

        let states: Vec<BuildState> = rx
            .iter()
            .filter_map(|e| match e {
                BuildEvent::StageStarted(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![
                BuildState::Discovering,
                BuildState::Exporting,
                BuildState::Indexing,
                BuildState::Done
            ]
        );
    }

    #[test]
    fn index_write_failure_is_an_error() {
        let tmp = setup_project();
        let mut options = options_for(&tmp);
        // Output "directory" is a file: exports fail, and so does the index
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        options.output_dir = blocker;

        let result = build(&options, &MockRenderer::new(), None);

        assert!(matches!(result, Err(BuildError::Index { .. })));
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let tmp = setup_project();
        let options = options_for(&tmp);

        build(&options, &MockRenderer::new(), None).unwrap();
        let first = read_index(&options);
        build(&options, &MockRenderer::new(), None).unwrap();
        let second = read_index(&options);

        assert_eq!(first, second);
    }
}
