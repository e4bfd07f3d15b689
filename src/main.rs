use clap::Parser;
use notebook_site::export::MarimoRenderer;
use notebook_site::pipeline::{self, BuildOptions};
use notebook_site::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notebook-site")]
#[command(about = "Build a static site from marimo notebooks")]
#[command(long_about = "\
Build a static site from marimo notebooks

Every .py file under notebooks/ and apps/ is exported with
`marimo export html-wasm`, and an index.html links to all of them,
newest first.

Project structure:

  .
  ├── site.toml                       # Site config (optional)
  ├── notebook_metadata.yml           # Titles, descriptions, images (optional)
  ├── apps/                           # Exported in run mode, code hidden
  │   └── 2025-03-15-blog_intro.py
  └── notebooks/                      # Exported in edit mode
      ├── 2025-03-20-duckdb_tour.py
      └── series/
          └── 2025-04-01-part_one.py  # Nested directories are mirrored

Card titles (first available wins):
  notebook_metadata.yml → filename (2025-03-15-blog_intro.py → \"Blog Intro\")")]
#[command(version)]
struct Cli {
    /// Output directory
    #[arg(long, default_value = "_site")]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let root = PathBuf::from(".");
    let site_config = config::load_config(&root)?;
    let renderer = MarimoRenderer::new(site_config.renderer.command.clone());
    let options = BuildOptions {
        root,
        output_dir: cli.output_dir,
        config: site_config,
    };

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_build_event(&event);
        }
    });
    let result = pipeline::build(&options, &renderer, Some(tx));
    // The sender is dropped when build returns, which ends the printer loop
    printer.join().ok();

    let report = result?;
    output::print_build_summary(&report);
    Ok(())
}
