//! Query engine: frequency, top-words, and context queries.
//!
//! The engine operates entirely through the [`DocumentStore`] trait. It keeps
//! no per-caller state; every call takes its keyword explicitly.
//!
//! # Freshness
//!
//! Each query first asks the store for its corpus version. If the cached
//! [`CorpusIndex`] was built at that version it is reused, otherwise the
//! documents are listed and a new index is built and cached. The version is
//! read before listing, so a cached index is never older than its tag.

use std::sync::Arc;

use crate::context::{ContextExtractor, DEFAULT_CONTEXT_WINDOW};
use crate::error::QueryError;
use crate::index::{CorpusIndex, IndexCache};
use crate::models::{ContextResult, CorpusStats, Document, FrequencyResult, WordCount};
use crate::store::DocumentStore;

/// Default number of entries returned by [`QueryEngine::top_words`].
pub const DEFAULT_TOP_WORDS: i64 = 20;

/// Query tuning parameters, decoupled from application config.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Words on each side of a match in context snippets.
    pub context_window: usize,
    /// `n` used by [`QueryEngine::top_words`] when the caller gives none.
    pub top_words_default: i64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            top_words_default: DEFAULT_TOP_WORDS,
        }
    }
}

/// Answers corpus queries against a [`DocumentStore`].
pub struct QueryEngine<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    cache: IndexCache,
    extractor: ContextExtractor,
    top_words_default: i64,
}

impl<S: DocumentStore + ?Sized> QueryEngine<S> {
    pub fn new(store: Arc<S>, options: QueryOptions) -> Self {
        Self {
            store,
            cache: IndexCache::new(),
            extractor: ContextExtractor::new(options.context_window),
            top_words_default: options.top_words_default,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Total occurrences of `keyword` across the corpus.
    ///
    /// Rejects empty or whitespace-only keywords without touching the store.
    /// The returned `keyword` is the trimmed input, not the normalized form.
    pub async fn search_frequency(&self, keyword: &str) -> Result<FrequencyResult, QueryError> {
        let keyword = validate_keyword(keyword)?;
        let index = self.index().await?;
        Ok(FrequencyResult {
            keyword: keyword.to_string(),
            frequency: index.frequency(keyword),
        })
    }

    /// The most frequent words, `n` defaulting to the configured value.
    /// `n <= 0` returns an empty list.
    pub async fn top_words(&self, n: Option<i64>) -> Result<Vec<WordCount>, QueryError> {
        let n = n.unwrap_or(self.top_words_default);
        if n <= 0 {
            return Ok(Vec::new());
        }
        let index = self.index().await?;
        Ok(index.top_words(usize::try_from(n).unwrap_or(usize::MAX)))
    }

    /// One concordance line per occurrence of `keyword`, ordered by document
    /// id and then position within the document.
    pub async fn search_context(&self, keyword: &str) -> Result<Vec<ContextResult>, QueryError> {
        let keyword = validate_keyword(keyword)?;
        let index = self.index().await?;
        let results = index
            .occurrences(keyword)
            .iter()
            .filter_map(|occurrence| {
                index
                    .document(occurrence.document_id)
                    .and_then(|doc| self.extractor.context_for(doc, *occurrence))
            })
            .collect();
        Ok(results)
    }

    /// Fetch a document by id straight from the store.
    pub async fn get_document(&self, id: i64) -> Result<Arc<Document>, QueryError> {
        self.store
            .get_document(id)
            .await?
            .ok_or(QueryError::NotFound(id))
    }

    pub async fn list_documents(&self) -> Result<Vec<Arc<Document>>, QueryError> {
        Ok(self.store.list_documents().await?)
    }

    pub async fn corpus_stats(&self) -> Result<CorpusStats, QueryError> {
        Ok(self.index().await?.stats())
    }

    /// Current index, rebuilt if the corpus changed since it was cached.
    pub async fn index(&self) -> Result<Arc<CorpusIndex>, QueryError> {
        let version = self.store.corpus_version().await?;
        if let Some(index) = self.cache.get(version) {
            return Ok(index);
        }
        let documents = self.store.list_documents().await?;
        let index = Arc::new(CorpusIndex::build(version, documents));
        self.cache.store(index.clone());
        Ok(index)
    }

    /// Drop the cached index; the next query rebuilds it.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

fn validate_keyword(keyword: &str) -> Result<&str, QueryError> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(QueryError::InvalidQuery(
            "keyword must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}
