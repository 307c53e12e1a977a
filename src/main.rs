//! # Corpus Harness CLI (`corpus`)
//!
//! The `corpus` binary manages a corpus of text documents and answers
//! frequency, top-words and concordance queries over it.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `corpus init` | Create the SQLite database and run schema migrations |
//! | `corpus add <file>` | Add a TXT, DOCX or PDF file as a document |
//! | `corpus import` | Add every matching file under a folder |
//! | `corpus list` | List documents |
//! | `corpus get <id>` | Print one document |
//! | `corpus remove <id>` | Delete a document |
//! | `corpus frequency <keyword>` | Total occurrences of a keyword |
//! | `corpus top` | Most frequent words |
//! | `corpus context <keyword>` | Every occurrence with surrounding words |
//! | `corpus stats` | Corpus totals and genre breakdown |
//! | `corpus serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! corpus init --config ./config/corpus.toml
//! corpus add ./files/indaba.docx --genre news --source "Isolezwe"
//! corpus import --root ./files
//! corpus top --n 10
//! corpus context umuntu
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use corpus_harness::{config, get, ingest, migrate, search, server, stats};

/// Corpus Harness CLI: keyword search over a document corpus.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/corpus.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "corpus",
    about = "Corpus Harness: keyword frequency and concordance search over a document corpus",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/corpus.toml")]
    config: PathBuf,

    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Idempotent: running it multiple times is safe.
    Init,

    /// Add a single file (.txt, .docx or .pdf) as a document.
    Add {
        /// File to add.
        file: PathBuf,

        /// Document title. Defaults to the file name without extension.
        #[arg(long)]
        title: Option<String>,

        /// Genre: news, literature, conversation, other, or auto to detect it.
        #[arg(long)]
        genre: Option<String>,

        /// Where the text came from.
        #[arg(long)]
        source: Option<String>,
    },

    /// Add every matching file under a folder.
    ///
    /// Files whose title already exists are skipped.
    Import {
        /// Folder to import. Overrides `[import].root`.
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// List all documents.
    List,

    /// Print a document by id.
    Get { id: i64 },

    /// Delete a document by id.
    Remove { id: i64 },

    /// Count occurrences of a keyword across the corpus.
    Frequency { keyword: String },

    /// Show the most frequent words.
    Top {
        /// Number of words. Defaults to `[query].top_words_default`.
        #[arg(long)]
        n: Option<i64>,
    },

    /// Show every occurrence of a keyword with surrounding words.
    Context { keyword: String },

    /// Show corpus statistics.
    Stats,

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized at {}", cfg.db.path.display());
        }
        Commands::Add {
            file,
            title,
            genre,
            source,
        } => {
            ingest::run_add(
                &cfg,
                &file,
                title.as_deref(),
                genre.as_deref(),
                source.as_deref(),
            )
            .await?;
        }
        Commands::Import { root } => {
            ingest::run_import(&cfg, root.as_deref()).await?;
        }
        Commands::List => {
            get::run_list(&cfg).await?;
        }
        Commands::Get { id } => {
            get::run_get(&cfg, id).await?;
        }
        Commands::Remove { id } => {
            get::run_remove(&cfg, id).await?;
        }
        Commands::Frequency { keyword } => {
            search::run_frequency(&cfg, &keyword).await?;
        }
        Commands::Top { n } => {
            search::run_top(&cfg, n).await?;
        }
        Commands::Context { keyword } => {
            search::run_context(&cfg, &keyword).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
