//! Concordance snippet extraction.
//!
//! A snippet is the matched word plus up to `window` words on each side,
//! taken verbatim from the document and joined by single spaces. The window
//! is clamped at the start and end of the text.

use crate::index::Occurrence;
use crate::models::{ContextResult, Document};

/// Words on each side of the match when nothing else is configured.
pub const DEFAULT_CONTEXT_WINDOW: usize = 10;

/// Builds [`ContextResult`]s for keyword occurrences.
#[derive(Debug, Clone, Copy)]
pub struct ContextExtractor {
    window: usize,
}

impl Default for ContextExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_WINDOW)
    }
}

impl ContextExtractor {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Snippet around the word at `word_offset` in `text`.
    ///
    /// An offset past the end of the text yields an empty string.
    pub fn extract(&self, text: &str, word_offset: usize) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        if word_offset >= words.len() {
            return String::new();
        }
        let start = word_offset.saturating_sub(self.window);
        let end = word_offset
            .saturating_add(self.window)
            .saturating_add(1)
            .min(words.len());
        words[start..end].join(" ")
    }

    /// Full result for one occurrence within `doc`.
    ///
    /// Returns `None` if the document has no text.
    pub fn context_for(&self, doc: &Document, occurrence: Occurrence) -> Option<ContextResult> {
        let text = doc.text.as_deref()?;
        Some(ContextResult {
            document_id: doc.id,
            title: doc.title.clone(),
            source: doc.source.clone(),
            snippet: self.extract(text, occurrence.word_offset),
            word_offset: occurrence.word_offset,
        })
    }
}
