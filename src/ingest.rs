//! Document ingestion: single files (`corpus add`) and folders (`corpus import`).
//!
//! Each file is converted to plain text by [`crate::extract`] and inserted
//! through the [`DocumentStore`] seam, which rejects duplicate titles.
//! During an import, duplicates and unreadable files are skipped with a
//! warning and the run continues.

use anyhow::{bail, Context, Result};
use std::path::Path;

use corpus_core::models::{Genre, NewDocument};
use corpus_core::store::DocumentStore;
use corpus_core::DuplicateTitle;

use crate::config::{Config, ImportConfig};
use crate::extract::extract_file;
use crate::genre::GenreChoice;
use crate::scan::{scan_folder, title_from_path};
use crate::sqlite_store::SqliteStore;

/// Outcome of ingesting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Added { id: i64, genre: Genre },
    Duplicate,
}

/// Read `path`, extract its text and insert it as a document.
///
/// The genre is resolved after extraction, so [`GenreChoice::Auto`] sees the
/// text. A duplicate title is reported as [`IngestOutcome::Duplicate`]; every
/// other failure is an error.
pub async fn ingest_file<S: DocumentStore + ?Sized>(
    store: &S,
    path: &Path,
    title: &str,
    genre: impl Into<GenreChoice>,
    source: &str,
) -> Result<IngestOutcome> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = extract_file(path, &bytes)?;
    let genre = genre.into().resolve(title, &text);

    let doc = NewDocument::new(title, source, genre, text);
    match store.insert_document(&doc).await {
        Ok(id) => Ok(IngestOutcome::Added { id, genre }),
        Err(e) if e.downcast_ref::<DuplicateTitle>().is_some() => Ok(IngestOutcome::Duplicate),
        Err(e) => Err(e),
    }
}

/// CLI entry point for `corpus add`.
pub async fn run_add(
    config: &Config,
    path: &Path,
    title: Option<&str>,
    genre: Option<&str>,
    source: Option<&str>,
) -> Result<()> {
    let store = SqliteStore::open(config).await?;

    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| title_from_path(path));
    let genre = genre.map(GenreChoice::parse).unwrap_or_default();
    let source = source.unwrap_or("manual");

    let outcome = ingest_file(&store, path, &title, genre, source).await;
    store.close().await;

    match outcome? {
        IngestOutcome::Added { id, genre } => {
            println!("added document {} ({})", id, title);
            println!("  genre:  {}", genre);
            println!("  source: {}", source);
            Ok(())
        }
        IngestOutcome::Duplicate => bail!(DuplicateTitle(title)),
    }
}

/// Counters reported at the end of an import.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub scanned: usize,
    pub added: usize,
    pub duplicates: usize,
    pub failed: usize,
}

/// Import every matching file under `root` into `store`.
pub async fn import_folder<S: DocumentStore + ?Sized>(
    store: &S,
    import: &ImportConfig,
    root: &Path,
) -> Result<ImportSummary> {
    let files = scan_folder(import, root)?;
    let genre = import.genre();

    let mut summary = ImportSummary {
        scanned: files.len(),
        ..Default::default()
    };

    for file in &files {
        let title = file.title();
        match ingest_file(store, &file.path, &title, genre, &import.default_source).await {
            Ok(IngestOutcome::Added { id, genre }) => {
                tracing::debug!(id, title = %title, genre = %genre, path = %file.relative, "imported");
                summary.added += 1;
            }
            Ok(IngestOutcome::Duplicate) => {
                tracing::warn!(title = %title, path = %file.relative, "skipping duplicate title");
                summary.duplicates += 1;
            }
            Err(e) => {
                tracing::warn!(path = %file.relative, error = %e, "skipping unreadable file");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// CLI entry point for `corpus import`.
pub async fn run_import(config: &Config, root: Option<&Path>) -> Result<()> {
    let import = config.import.clone().unwrap_or_else(|| ImportConfig {
        root: root.map(Path::to_path_buf).unwrap_or_default(),
        include_globs: crate::config::default_include_globs(),
        exclude_globs: Vec::new(),
        default_genre: None,
        default_source: crate::config::default_source(),
    });
    let root = root.unwrap_or(&import.root);
    if root.as_os_str().is_empty() {
        bail!("No import root: pass --root or configure [import].root");
    }

    let store = SqliteStore::open(config).await?;
    let summary = import_folder(&store, &import, root).await;
    store.close().await;
    let summary = summary?;

    println!("import {}", root.display());
    println!("  scanned:    {} files", summary.scanned);
    println!("  added:      {}", summary.added);
    println!("  duplicates: {}", summary.duplicates);
    println!("  failed:     {}", summary.failed);
    println!("ok");

    Ok(())
}
