//! Site configuration.
//!
//! Loads and validates the optional `site.toml` in the project root. Keys the
//! file leaves out keep their defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Crazy Treyn Blog"                        # <title> and page heading
//! subtitle = "A different kind of Data Analytics blog."
//! stylesheet = "https://cdn.tailwindcss.com"       # CSS delivered via CDN script
//! metadata_file = "notebook_metadata.yml"          # Per-notebook titles, descriptions, images
//!
//! [renderer]
//! command = "marimo"                               # Program invoked to export notebooks
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Blog title, used for the document title and the page heading.
    pub title: String,
    /// Line shown under the heading.
    pub subtitle: String,
    /// Script URL providing the page styles.
    pub stylesheet: String,
    /// Metadata file, relative to the project root.
    pub metadata_file: String,
    /// External renderer settings.
    pub renderer: RendererConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Crazy Treyn Blog".to_string(),
            subtitle: "A different kind of Data Analytics blog.".to_string(),
            stylesheet: "https://cdn.tailwindcss.com".to_string(),
            metadata_file: "notebook_metadata.yml".to_string(),
            renderer: RendererConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.metadata_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "metadata_file must not be empty".into(),
            ));
        }
        if self.renderer.command.trim().is_empty() {
            return Err(ConfigError::Validation(
                "renderer.command must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// External renderer settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Program to run; must understand `export html-wasm`.
    pub command: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: "marimo".to_string(),
        }
    }
}

/// Parse and validate `site.toml` content.
///
/// Every field has a default, so the file only needs the keys it changes.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `site.toml` from the project root, or the defaults when there is none.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    match fs::read_to_string(root.join(CONFIG_FILE)) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SiteConfig::default()),
        Err(e) => Err(e.into()),
    }
}
