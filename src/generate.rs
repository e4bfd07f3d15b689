//! Index page generation.
//!
//! Stage 3 of the build. Renders `index.html`: a header with the site title
//! and subtitle, followed by one card per notebook linking to its exported
//! artifact.
//!
//! ```text
//! _site/
//! ├── index.html                          # Generated here
//! ├── apps/2025-03-15-blog_intro.html     # Written by the renderer
//! └── notebooks/2025-03-20-duckdb_tour.html
//! ```
//!
//! Cards are rendered in the order received; sorting is the caller's job.
//! Empty descriptions and images are left out of the markup entirely.
//!
//! HTML is built with [maud](https://maud.lambda.xyz/), so every title,
//! description and image URL taken from the metadata file is escaped.

use crate::config::SiteConfig;
use crate::types::IndexEntry;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the generated page at the output root.
pub const INDEX_FILE: &str = "index.html";

/// Render the index page.
pub fn render_index(entries: &[IndexEntry], config: &SiteConfig) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.title) }
                script src=(config.stylesheet) {}
            }
            body class="bg-[#282c34] text-[#abb2bf] font-sans p-8" {
                div class="max-w-4xl mx-auto" {
                    (site_header(config))
                    div class="grid gap-4 grid-cols-1" {
                        @for entry in entries {
                            (render_card(entry))
                        }
                    }
                }
            }
        }
    }
}

/// Title and subtitle block.
fn site_header(config: &SiteConfig) -> Markup {
    html! {
        div class="mb-8 text-center" {
            h1 class="text-3xl font-bold mb-2 text-[#abb2bf]" { (config.title) }
            p class="text-[#5c6370]" { (config.subtitle) }
        }
    }
}

/// One notebook card: title and description on the left, image on the right.
fn render_card(entry: &IndexEntry) -> Markup {
    html! {
        a href=(entry.href)
            class="block w-full p-6 border border-[#5c6370] rounded transition duration-200 hover:bg-[#3E4451] max-w-xl mx-auto" {
            div class="flex items-start space-x-4" {
                div {
                    h3 class="text-2xl font-semibold mb-2 text-[#61afef]" { (entry.title) }
                    @if !entry.description.is_empty() {
                        p class="text-[#abb2bf]" { (entry.description) }
                    }
                }
                @if !entry.image.is_empty() {
                    img src=(entry.image) alt=(entry.title) class="w-32 h-auto rounded";
                }
            }
        }
    }
}

/// Render and write `index.html` into `output_dir`, creating it if needed.
pub fn write_index(
    output_dir: &Path,
    entries: &[IndexEntry],
    config: &SiteConfig,
) -> std::io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(INDEX_FILE);
    fs::write(&path, render_index(entries, config).into_string())?;
    Ok(path)
}
