//! Shared test utilities for the notebook-site test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project();
//! let options = options_for(&tmp);
//! build(&options, &MockRenderer::new(), None).unwrap();
//!
//! assert_eq!(card_titles(&read_index(&options)), vec!["Part One", "A Tour of DuckDB", "Hello World"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::generate::INDEX_FILE;
use crate::pipeline::BuildOptions;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/project/` to a temp directory and return it.
///
/// The fixture holds one app, two notebooks (one nested) and a metadata file
/// covering two of them.
pub fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/project");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build options rooted at `tmp`, writing to `tmp/_site`.
pub fn options_for(tmp: &TempDir) -> BuildOptions {
    BuildOptions {
        root: tmp.path().to_path_buf(),
        output_dir: tmp.path().join("_site"),
        config: SiteConfig::default(),
    }
}

// =========================================================================
// Index inspection
// =========================================================================

/// Read the generated index page. Panics if it was not written.
pub fn read_index(options: &BuildOptions) -> String {
    let path = options.output_dir.join(INDEX_FILE);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("index not readable at {}: {e}", path.display()))
}

/// Card titles in page order.
pub fn card_titles(html: &str) -> Vec<String> {
    const OPEN: &str = r#"text-[#61afef]">"#;
    html.split(OPEN)
        .skip(1)
        .filter_map(|rest| rest.split_once("</h3>").map(|(title, _)| title.to_string()))
        .collect()
}
