//! Error types surfaced by the query engine and stores.

use thiserror::Error;

/// Failure of a query against the corpus.
///
/// "No occurrences" is never an error: it is a zero frequency or an empty
/// result list. Store failures are always propagated as [`QueryError::Store`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request is missing required input (e.g. an empty keyword).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A referenced document id does not exist.
    #[error("document not found: {0}")]
    NotFound(i64),

    /// The document store failed.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Returned by stores (inside `anyhow::Error`) when a title is already taken.
#[derive(Debug, Error)]
#[error("document with title '{0}' already exists")]
pub struct DuplicateTitle(pub String);
