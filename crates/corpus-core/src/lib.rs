//! # Corpus Core
//!
//! Shared logic for Corpus Harness: data models, tokenizer, corpus index,
//! context extraction, store abstraction, and the query engine.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or HTTP
//! dependencies. Storage is reached only through the
//! [`DocumentStore`](store::DocumentStore) trait.
//!
//! ## Query flow
//!
//! ```text
//! DocumentStore ──▶ tokenize ──▶ CorpusIndex ──▶ QueryEngine
//!                                    │               │
//!                                    └─ postings ──▶ ContextExtractor
//! ```

pub mod context;
pub mod error;
pub mod index;
pub mod models;
pub mod query;
pub mod store;
pub mod tokenize;

pub use error::{DuplicateTitle, QueryError};
pub use query::{QueryEngine, QueryOptions};
