//! In-memory [`DocumentStore`] implementation for tests and library users.
//!
//! Documents live in a `BTreeMap` behind a single `RwLock`, so a listing is
//! always a consistent snapshot and comes out ordered by id.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::DuplicateTitle;
use crate::models::{Document, NewDocument};

use super::DocumentStore;

struct Inner {
    docs: BTreeMap<i64, Arc<Document>>,
    next_id: i64,
    version: u64,
}

/// In-memory store for tests and library users without a database.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                docs: BTreeMap::new(),
                next_id: 1,
                version: 0,
            }),
        }
    }

    /// Build a store pre-populated with `docs`, ids assigned in order.
    pub fn with_documents(docs: impl IntoIterator<Item = NewDocument>) -> Result<Self> {
        let store = Self::new();
        for doc in docs {
            store.insert(&doc)?;
        }
        Ok(store)
    }

    fn insert(&self, doc: &NewDocument) -> Result<i64> {
        let mut inner = self.inner.write();
        if inner.docs.values().any(|d| d.title == doc.title) {
            return Err(DuplicateTitle(doc.title.clone()).into());
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.version += 1;
        inner.docs.insert(
            id,
            Arc::new(Document {
                id,
                title: doc.title.clone(),
                source: doc.source.clone(),
                genre: doc.genre,
                text: doc.text.clone(),
            }),
        );
        Ok(id)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_documents(&self) -> Result<Vec<Arc<Document>>> {
        Ok(self.inner.read().docs.values().cloned().collect())
    }

    async fn get_document(&self, id: i64) -> Result<Option<Arc<Document>>> {
        Ok(self.inner.read().docs.get(&id).cloned())
    }

    async fn corpus_version(&self) -> Result<u64> {
        Ok(self.inner.read().version)
    }

    async fn insert_document(&self, doc: &NewDocument) -> Result<i64> {
        self.insert(doc)
    }

    async fn remove_document(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.write();
        let removed = inner.docs.remove(&id).is_some();
        if removed {
            inner.version += 1;
        }
        Ok(removed)
    }
}
