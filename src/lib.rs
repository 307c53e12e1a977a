//! # Corpus Harness
//!
//! Keyword frequency, top-words and concordance search over a corpus of
//! text documents stored in SQLite.
//!
//! The query logic lives in the `corpus-core` crate; this crate adds the
//! SQLite store, file ingestion, the `corpus` CLI and the HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────┐
//! │ Files       │──▶│  Extract     │──▶│  SQLite   │
//! │ TXT/DOCX/PDF│   │  + Ingest    │   │ documents │
//! └─────────────┘   └─────────────┘   └────┬─────┘
//!                                          │
//!                                   ┌──────▼──────┐
//!                                   │ QueryEngine │
//!                                   │ (cached idx)│
//!                                   └──────┬──────┘
//!                      ┌───────────────────┤
//!                      ▼                   ▼
//!                 ┌──────────┐       ┌──────────┐
//!                 │   CLI    │       │   HTTP   │
//!                 │ (corpus) │       │  (axum)  │
//!                 └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! corpus init                          # create database
//! corpus import --root ./files         # ingest a folder
//! corpus frequency umuntu
//! corpus context umuntu
//! corpus serve                         # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite document store |
//! | [`extract`] | Text extraction from TXT, DOCX and PDF |
//! | [`scan`] | Folder scanning with include/exclude globs |
//! | [`genre`] | Keyword-based genre detection |
//! | [`ingest`] | `add` and `import` commands |
//! | [`get`] | `list`, `get` and `remove` commands |
//! | [`search`] | `frequency`, `top` and `context` commands |
//! | [`stats`] | `stats` command |
//! | [`server`] | HTTP server |

pub mod config;
pub mod db;
pub mod extract;
pub mod genre;
pub mod get;
pub mod ingest;
pub mod migrate;
pub mod scan;
pub mod search;
pub mod server;
pub mod sqlite_store;
pub mod stats;
