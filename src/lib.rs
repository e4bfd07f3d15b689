//! # Notebook Site
//!
//! A static site builder for a blog made of [marimo](https://marimo.io)
//! notebooks. Every notebook under `notebooks/` and `apps/` is exported to a
//! self-contained WebAssembly HTML page, and an `index.html` links to all of
//! them, newest first.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Discover  notebooks/ apps/  →  documents        (filesystem → structured data)
//! 2. Export    documents         →  _site/**/*.html  (one renderer call each)
//! 3. Index     documents + yml   →  _site/index.html (cards, newest first)
//! ```
//!
//! [`pipeline::build`] runs all three. Stages share no state beyond the
//! document list, so each is tested on its own: discovery against a temp
//! directory, export against a mock [`export::Renderer`], and index rendering
//! as a pure function from entries to markup.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the source directories and collects `.py` documents |
//! | [`export`] | Stage 2: `Renderer` trait, the marimo subprocess renderer, failure isolation |
//! | [`generate`] | Stage 3: renders `index.html` with Maud |
//! | [`pipeline`] | Runs the stages in order, sorts documents, emits progress events |
//! | [`config`] | `site.toml` loading, merging over stock defaults, validation |
//! | [`metadata`] | Optional `notebook_metadata.yml` with per-notebook titles and images |
//! | [`types`] | `Document`, `RenderMode`, `ExportResult`, `IndexEntry` |
//! | [`naming`] | `YYYY-MM-DD-name` filename convention and title derivation |
//! | [`output`] | Console formatting of build events |
//!
//! # Design Decisions
//!
//! ## Source Directory Decides the Mode
//!
//! Notebooks under `apps/` are exported in run mode with code hidden; those
//! under `notebooks/` are exported in edit mode. There is no per-file
//! override. Moving a file between the two directories is the switch.
//!
//! ## One Failure Never Stops the Build
//!
//! A notebook that fails to export is reported with the renderer's output and
//! the build moves on. It still gets a card in the index, so the page layout
//! depends only on which notebooks exist, not on which ones rendered this time.
//!
//! ## Date Prefixes Order the Index
//!
//! Files are named `YYYY-MM-DD-slug.py`. Sorting file names descending puts the
//! newest post first without parsing dates or reading front-matter. The prefix
//! is stripped when deriving titles and metadata keys.
//!
//! ## Maud Over Template Engines
//!
//! Titles and descriptions come from a hand-edited YAML file. Maud escapes
//! every interpolated value, so a stray `<` or `&` in a description cannot
//! break the page.

pub mod config;
pub mod export;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
