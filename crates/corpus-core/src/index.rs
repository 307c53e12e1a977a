//! Corpus index: frequency table and postings over a document snapshot.
//!
//! A [`CorpusIndex`] is immutable once built. It is tagged with the store's
//! corpus version, and the [`IndexCache`] hands out the cached index only
//! while that version is still current. Any insert or removal changes the
//! version, so the next query rebuilds from scratch.
//!
//! # Build
//!
//! 1. Tokenize each document's text with offsets.
//! 2. Increment the token's count and append `(document, word offset)` to
//!    its postings.
//! 3. Documents without text are skipped with a warning and their ids are
//!    kept in [`CorpusIndex::skipped_documents`].
//!
//! # Ranking
//!
//! [`CorpusIndex::top_words`] orders by count descending, then by token
//! ascending so that equal counts always come out in the same order.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::{CorpusStats, Document, Genre, GenreCount, WordCount};
use crate::tokenize::{normalize, tokenize_with_offsets, word_count};

/// One occurrence of a token: the document and the word offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub document_id: i64,
    pub word_offset: usize,
}

#[derive(Debug, Default)]
struct TermEntry {
    count: u64,
    postings: Vec<Occurrence>,
}

/// Frequency table and postings for one corpus version.
#[derive(Debug)]
pub struct CorpusIndex {
    version: u64,
    terms: HashMap<String, TermEntry>,
    documents: BTreeMap<i64, Arc<Document>>,
    skipped: Vec<i64>,
    total_words: u64,
    total_tokens: u64,
}

impl CorpusIndex {
    /// Index `documents` as the corpus at `version`.
    pub fn build(version: u64, documents: Vec<Arc<Document>>) -> Self {
        let mut terms: HashMap<String, TermEntry> = HashMap::new();
        let mut skipped = Vec::new();
        let mut total_words = 0u64;
        let mut total_tokens = 0u64;
        let mut by_id = BTreeMap::new();

        for doc in documents {
            match doc.text.as_deref() {
                Some(text) => {
                    total_words += word_count(text) as u64;
                    for (word_offset, token) in tokenize_with_offsets(text) {
                        let entry = terms.entry(token).or_default();
                        entry.count += 1;
                        entry.postings.push(Occurrence {
                            document_id: doc.id,
                            word_offset,
                        });
                        total_tokens += 1;
                    }
                }
                None => {
                    tracing::warn!(
                        document_id = doc.id,
                        title = %doc.title,
                        "skipping malformed document without text"
                    );
                    skipped.push(doc.id);
                }
            }
            by_id.insert(doc.id, doc);
        }

        // Postings are built per document; keep them in id order even if the
        // store listed documents out of order.
        for entry in terms.values_mut() {
            entry.postings.sort_by_key(|o| (o.document_id, o.word_offset));
        }

        tracing::debug!(
            version,
            documents = by_id.len(),
            unique_tokens = terms.len(),
            skipped = skipped.len(),
            "corpus index built"
        );

        Self {
            version,
            terms,
            documents: by_id,
            skipped,
            total_words,
            total_tokens,
        }
    }

    /// Corpus version this index was built from.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Total occurrences of `keyword` after normalization. Unknown → 0.
    pub fn frequency(&self, keyword: &str) -> u64 {
        self.terms
            .get(&normalize(keyword.trim()))
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// The `n` most frequent tokens, count descending then token ascending.
    pub fn top_words(&self, n: usize) -> Vec<WordCount> {
        if n == 0 {
            return Vec::new();
        }
        let mut entries: Vec<(&String, u64)> =
            self.terms.iter().map(|(word, e)| (word, e.count)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
            .into_iter()
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count,
            })
            .collect()
    }

    /// Every occurrence of `keyword` after normalization, ordered by
    /// document id then word offset.
    pub fn occurrences(&self, keyword: &str) -> &[Occurrence] {
        self.terms
            .get(&normalize(keyword.trim()))
            .map(|e| e.postings.as_slice())
            .unwrap_or(&[])
    }

    /// The snapshot document with `id`, if it was part of this index.
    pub fn document(&self, id: i64) -> Option<&Arc<Document>> {
        self.documents.get(&id)
    }

    /// Ids of documents skipped because they had no text.
    pub fn skipped_documents(&self) -> &[i64] {
        &self.skipped
    }

    pub fn stats(&self) -> CorpusStats {
        let mut genre_counts: BTreeMap<Genre, u64> = BTreeMap::new();
        for doc in self.documents.values() {
            *genre_counts.entry(doc.genre).or_default() += 1;
        }
        CorpusStats {
            total_documents: self.documents.len() as u64,
            total_words: self.total_words,
            total_tokens: self.total_tokens,
            unique_tokens: self.terms.len() as u64,
            malformed_documents: self.skipped.len() as u64,
            genres: Genre::ALL
                .iter()
                .filter_map(|g| {
                    genre_counts.get(g).map(|&count| GenreCount { genre: *g, count })
                })
                .collect(),
        }
    }
}

/// Holds the most recently built index.
///
/// Readers get an `Arc` to an immutable index; replacing it never affects
/// readers that already hold one.
#[derive(Default)]
pub struct IndexCache {
    current: RwLock<Option<Arc<CorpusIndex>>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached index if it was built at `version`.
    pub fn get(&self, version: u64) -> Option<Arc<CorpusIndex>> {
        self.current
            .read()
            .as_ref()
            .filter(|index| index.version() == version)
            .cloned()
    }

    /// Replace the cached index.
    ///
    /// Versions are only compared for equality: a store that was recreated
    /// restarts its counter, so a lower version can be the current one.
    pub fn store(&self, index: Arc<CorpusIndex>) {
        *self.current.write() = Some(index);
    }

    pub fn invalidate(&self) {
        *self.current.write() = None;
    }
}
