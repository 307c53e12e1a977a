//! Corpus queries from the command line.
//!
//! `corpus frequency`, `corpus top` and `corpus context` each open the
//! database, run one [`QueryEngine`](corpus_core::QueryEngine) query and print
//! the result. An empty keyword fails with the engine's `InvalidQuery` error,
//! which makes the process exit non-zero.

use anyhow::Result;

use crate::config::Config;
use crate::sqlite_store::open_engine;

pub async fn run_frequency(config: &Config, keyword: &str) -> Result<()> {
    let engine = open_engine(config).await?;
    let result = engine.search_frequency(keyword).await;
    engine.store().close().await;
    let result = result?;

    println!("{}: {}", result.keyword, result.frequency);
    Ok(())
}

pub async fn run_top(config: &Config, n: Option<i64>) -> Result<()> {
    let engine = open_engine(config).await?;
    let words = engine.top_words(n).await;
    engine.store().close().await;
    let words = words?;

    if words.is_empty() {
        println!("No results.");
        return Ok(());
    }

    println!("{:>4}  {:<24} {:>8}", "RANK", "WORD", "COUNT");
    println!("{}", "-".repeat(38));
    for (i, w) in words.iter().enumerate() {
        println!("{:>4}  {:<24} {:>8}", i + 1, w.word, w.count);
    }
    Ok(())
}

pub async fn run_context(config: &Config, keyword: &str) -> Result<()> {
    let engine = open_engine(config).await?;
    let results = engine.search_context(keyword).await;
    engine.store().close().await;
    let results = results?;

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!("{}. {} / {}", i + 1, result.source, result.title);
        println!("    excerpt: \"{}\"", result.snippet);
        println!("    id: {}  word: {}", result.document_id, result.word_offset);
        println!();
    }
    println!("{} occurrence(s)", results.len());
    Ok(())
}
