//! Core data models used throughout Corpus Harness.
//!
//! These types represent the documents that flow in from the store and the
//! result shapes returned by the query engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of corpus genres.
///
/// Unknown or missing values normalize to [`Genre::Other`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    News,
    Literature,
    Conversation,
    #[default]
    Other,
}

impl Genre {
    /// Every genre, in display order.
    pub const ALL: [Genre; 4] = [
        Genre::News,
        Genre::Literature,
        Genre::Conversation,
        Genre::Other,
    ];

    /// Case-insensitive parse. Anything unrecognized becomes `Other`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "news" => Genre::News,
            "literature" => Genre::Literature,
            "conversation" => Genre::Conversation,
            _ => Genre::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::News => "news",
            Genre::Literature => "literature",
            Genre::Conversation => "conversation",
            Genre::Other => "other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A stored corpus document.
///
/// `text` is optional so that rows missing their content can still be
/// listed; the index skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub source: String,
    pub genre: Genre,
    pub text: Option<String>,
}

/// Input for ingesting a new document. The store assigns the id.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewDocument {
    pub title: String,
    pub source: String,
    #[serde(default, deserialize_with = "deserialize_genre")]
    pub genre: Genre,
    pub text: Option<String>,
}

impl NewDocument {
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        genre: Genre,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            genre,
            text: Some(text.into()),
        }
    }
}

fn deserialize_genre<'de, D>(deserializer: D) -> Result<Genre, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Genre::parse).unwrap_or_default())
}

/// Response of a frequency query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyResult {
    /// The keyword as given, trimmed of surrounding whitespace.
    pub keyword: String,
    pub frequency: u64,
}

/// One entry of the top-words ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// A concordance line for one keyword occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextResult {
    pub document_id: i64,
    pub title: String,
    pub source: String,
    /// Window of words around the occurrence, original case.
    pub snippet: String,
    /// Index of the matched word among the document's whitespace-separated words.
    pub word_offset: usize,
}

/// Per-genre document count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: Genre,
    pub count: u64,
}

/// Corpus-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub total_documents: u64,
    /// Whitespace-separated words, before normalization.
    pub total_words: u64,
    pub total_tokens: u64,
    pub unique_tokens: u64,
    pub malformed_documents: u64,
    /// Only genres with at least one document.
    pub genres: Vec<GenreCount>,
}
