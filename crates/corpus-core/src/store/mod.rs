//! Storage abstraction for Corpus Harness.
//!
//! The [`DocumentStore`] trait is the only way the query engine reaches
//! documents, enabling pluggable backends (SQLite, in-memory).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Document, NewDocument};

/// Abstract document store.
///
/// All operations are async (via `async-trait`); callers must assume they
/// may block on I/O.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_documents`](DocumentStore::list_documents) | Consistent snapshot of every document, ordered by id |
/// | [`get_document`](DocumentStore::get_document) | Fetch one document by id |
/// | [`corpus_version`](DocumentStore::corpus_version) | Counter that changes whenever membership changes |
/// | [`insert_document`](DocumentStore::insert_document) | Ingest a new document |
/// | [`remove_document`](DocumentStore::remove_document) | Delete a document by id |
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document currently in the corpus, ordered by ascending id.
    ///
    /// The returned set must be a consistent snapshot.
    async fn list_documents(&self) -> Result<Vec<Arc<Document>>>;

    /// Retrieve a single document. `Ok(None)` if the id does not exist.
    async fn get_document(&self, id: i64) -> Result<Option<Arc<Document>>>;

    /// Monotonically increasing counter, bumped by every insert and removal.
    async fn corpus_version(&self) -> Result<u64>;

    /// Insert a new document and return its id. Ids are never reused.
    ///
    /// Fails with [`DuplicateTitle`](crate::DuplicateTitle) if the title is
    /// already present.
    async fn insert_document(&self, doc: &NewDocument) -> Result<i64>;

    /// Remove a document. Returns `false` if it did not exist.
    async fn remove_document(&self, id: i64) -> Result<bool>;
}
