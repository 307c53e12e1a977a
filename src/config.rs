use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use corpus_core::context::DEFAULT_CONTEXT_WINDOW;
use corpus_core::query::DEFAULT_TOP_WORDS;
use corpus_core::QueryOptions;

use crate::genre::GenreChoice;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub query: QueryConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub import: Option<ImportConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    #[serde(default = "default_context_window")]
    pub context_window: usize,
    #[serde(default = "default_top_words")]
    pub top_words_default: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            top_words_default: DEFAULT_TOP_WORDS,
        }
    }
}

impl QueryConfig {
    pub fn options(&self) -> QueryOptions {
        QueryOptions {
            context_window: self.context_window,
            top_words_default: self.top_words_default,
        }
    }
}

fn default_context_window() -> usize {
    DEFAULT_CONTEXT_WINDOW
}
fn default_top_words() -> i64 {
    DEFAULT_TOP_WORDS
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

/// Folder import settings (`corpus import`).
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub default_genre: Option<String>,
    #[serde(default = "default_source")]
    pub default_source: String,
}

impl ImportConfig {
    /// Genre for imported files; `default_genre = "auto"` detects it per file.
    pub fn genre(&self) -> GenreChoice {
        self.default_genre
            .as_deref()
            .map(GenreChoice::parse)
            .unwrap_or_default()
    }
}

pub fn default_include_globs() -> Vec<String> {
    vec![
        "**/*.txt".to_string(),
        "**/*.docx".to_string(),
        "**/*.pdf".to_string(),
    ]
}

pub fn default_source() -> String {
    "filesystem".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate query
    if config.query.context_window == 0 {
        anyhow::bail!("query.context_window must be > 0");
    }
    if config.query.top_words_default < 1 {
        anyhow::bail!("query.top_words_default must be >= 1");
    }

    // Validate import
    if let Some(import) = &config.import {
        if import.include_globs.is_empty() {
            anyhow::bail!("import.include_globs must not be empty");
        }
    }

    Ok(config)
}
