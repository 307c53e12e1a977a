//! Corpus statistics overview (`corpus stats`).
//!
//! Prints document and word totals, the number of documents skipped for
//! missing text, and a per-genre breakdown.

use anyhow::Result;

use crate::config::Config;
use crate::sqlite_store::open_engine;

/// Run the stats command: build the index and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let engine = open_engine(config).await?;
    let stats = engine.corpus_stats().await;
    engine.store().close().await;
    let stats = stats?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Corpus Harness Stats");
    println!("====================");
    println!();
    println!("  Database:    {}", config.db.path.display());
    println!("  Size:        {}", format_bytes(db_size));
    println!();
    println!("  Documents:   {}", stats.total_documents);
    println!("  Words:       {}", stats.total_words);
    println!("  Tokens:      {}", stats.total_tokens);
    println!("  Unique:      {}", stats.unique_tokens);
    if stats.malformed_documents > 0 {
        println!("  Malformed:   {} (no text, not indexed)", stats.malformed_documents);
    }

    if !stats.genres.is_empty() {
        println!();
        println!("  By genre:");
        println!("  {:<16} {:>6} {:>6}", "GENRE", "DOCS", "SHARE");
        println!("  {}", "-".repeat(30));
        for g in &stats.genres {
            let share = if stats.total_documents > 0 {
                (g.count * 100) / stats.total_documents
            } else {
                0
            };
            println!("  {:<16} {:>6} {:>5}%", g.genre, g.count, share);
        }
    }

    println!();
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
