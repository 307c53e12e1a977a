//! Document retrieval and removal by id.
//!
//! Backs `corpus list`, `corpus get` and `corpus remove`. The HTTP server
//! answers the same requests through [`corpus_core::QueryEngine`] directly.

use anyhow::Result;

use corpus_core::models::Document;
use corpus_core::store::DocumentStore;
use corpus_core::tokenize::word_count;

use crate::config::Config;
use crate::sqlite_store::{open_engine, SqliteStore};

/// CLI entry point for `corpus list`.
pub async fn run_list(config: &Config) -> Result<()> {
    let engine = open_engine(config).await?;
    let docs = engine.list_documents().await;
    engine.store().close().await;
    let docs = docs?;

    if docs.is_empty() {
        println!("No documents.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<32} {:<14} {:<20} {:>7}",
        "ID", "TITLE", "GENRE", "SOURCE", "WORDS"
    );
    println!("{}", "-".repeat(82));
    for doc in &docs {
        println!(
            "{:>5}  {:<32} {:<14} {:<20} {:>7}",
            doc.id,
            truncate(&doc.title, 32),
            doc.genre,
            truncate(&doc.source, 20),
            doc_words(doc),
        );
    }
    println!();
    println!("{} document(s)", docs.len());

    Ok(())
}

/// CLI entry point for `corpus get`. Exits with status 1 if the id is unknown.
pub async fn run_get(config: &Config, id: i64) -> Result<()> {
    let engine = open_engine(config).await?;
    let doc = engine.get_document(id).await;
    engine.store().close().await;

    let doc = match doc {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("--- Document ---");
    println!("id:       {}", doc.id);
    println!("title:    {}", doc.title);
    println!("source:   {}", doc.source);
    println!("genre:    {}", doc.genre);
    println!("words:    {}", doc_words(&doc));
    println!();
    match doc.text.as_deref() {
        Some(text) => println!("{}", text),
        None => println!("(no text)"),
    }

    Ok(())
}

/// CLI entry point for `corpus remove`. Exits with status 1 if the id is unknown.
pub async fn run_remove(config: &Config, id: i64) -> Result<()> {
    let store = SqliteStore::open(config).await?;
    let removed = store.remove_document(id).await;
    store.close().await;

    if !removed? {
        eprintln!("Error: document not found: {}", id);
        std::process::exit(1);
    }
    println!("removed document {}", id);
    Ok(())
}

fn doc_words(doc: &Document) -> usize {
    doc.text.as_deref().map(word_count).unwrap_or(0)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
