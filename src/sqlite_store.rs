//! SQLite-backed [`DocumentStore`] implementation.
//!
//! Documents live in the `documents` table; the corpus version is a counter
//! row in `corpus_meta` that is bumped in the same transaction as every
//! insert or removal.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use corpus_core::models::{Document, Genre, NewDocument};
use corpus_core::store::DocumentStore;
use corpus_core::{DuplicateTitle, QueryEngine};

use crate::config::Config;
use crate::db;
use crate::migrate::{migrate_pool, CORPUS_VERSION_KEY};

/// SQLite implementation of the [`DocumentStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect using `config` and make sure the schema exists.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate_pool(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Open the configured database and wrap it in a [`QueryEngine`].
pub async fn open_engine(config: &Config) -> Result<QueryEngine<SqliteStore>> {
    let store = SqliteStore::open(config).await?;
    Ok(QueryEngine::new(Arc::new(store), config.query.options()))
}

fn row_to_document(row: &SqliteRow) -> Document {
    let genre: String = row.get("genre");
    Document {
        id: row.get("id"),
        title: row.get("title"),
        source: row.get("source"),
        genre: Genre::parse(&genre),
        text: row.get("text"),
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn list_documents(&self) -> Result<Vec<Arc<Document>>> {
        let rows =
            sqlx::query("SELECT id, title, source, genre, text FROM documents ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.iter().map(|r| Arc::new(row_to_document(r))).collect())
    }

    async fn get_document(&self, id: i64) -> Result<Option<Arc<Document>>> {
        let row = sqlx::query("SELECT id, title, source, genre, text FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| Arc::new(row_to_document(&r))))
    }

    async fn corpus_version(&self) -> Result<u64> {
        let version: Option<i64> =
            sqlx::query_scalar("SELECT value FROM corpus_meta WHERE key = ?")
                .bind(CORPUS_VERSION_KEY)
                .fetch_optional(&self.pool)
                .await?;
        Ok(version.unwrap_or(0).max(0) as u64)
    }

    async fn insert_document(&self, doc: &NewDocument) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        // The INSERT is the first statement so the transaction takes the write
        // lock up front; the UNIQUE(title) constraint decides duplicates.
        let result =
            sqlx::query("INSERT INTO documents (title, source, genre, text) VALUES (?, ?, ?, ?)")
                .bind(&doc.title)
                .bind(&doc.source)
                .bind(doc.genre.as_str())
                .bind(&doc.text)
                .execute(&mut *tx)
                .await;
        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(DuplicateTitle(doc.title.clone()).into());
            }
            Err(e) => return Err(e.into()),
        };

        bump_version(&mut tx).await?;
        tx.commit().await?;

        Ok(id)
    }

    async fn remove_document(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let removed = result.rows_affected() > 0;
        if removed {
            bump_version(&mut tx).await?;
        }
        tx.commit().await?;

        Ok(removed)
    }
}

async fn bump_version(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO corpus_meta (key, value) VALUES (?, 1)
        ON CONFLICT(key) DO UPDATE SET value = value + 1
        "#,
    )
    .bind(CORPUS_VERSION_KEY)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DbConfig, QueryConfig, ServerConfig};
    use tempfile::TempDir;

    async fn open_store(tmp: &TempDir) -> SqliteStore {
        let config = Config {
            db: DbConfig {
                path: tmp.path().join("data/corpus.sqlite"),
            },
            query: QueryConfig::default(),
            server: ServerConfig {
                bind: "127.0.0.1:0".to_string(),
            },
            import: None,
        };
        SqliteStore::open(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_get_list() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(&tmp).await;

        let a = store
            .insert_document(&NewDocument::new("A", "src", Genre::News, "alpha text"))
            .await
            .unwrap();
        let b = store
            .insert_document(&NewDocument::new("B", "src", Genre::Other, "beta text"))
            .await
            .unwrap();
        assert!(a < b);

        let doc = store.get_document(a).await.unwrap().unwrap();
        assert_eq!(doc.title, "A");
        assert_eq!(doc.genre, Genre::News);
        assert_eq!(doc.text.as_deref(), Some("alpha text"));
        assert!(store.get_document(999).await.unwrap().is_none());

        let ids: Vec<i64> = store
            .list_documents()
            .await
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn test_version_tracks_membership() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(&tmp).await;
        assert_eq!(store.corpus_version().await.unwrap(), 0);

        let id = store
            .insert_document(&NewDocument::new("A", "src", Genre::News, "text"))
            .await
            .unwrap();
        assert_eq!(store.corpus_version().await.unwrap(), 1);

        let err = store
            .insert_document(&NewDocument::new("A", "other", Genre::News, "text"))
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<DuplicateTitle>().is_some());
        assert_eq!(store.corpus_version().await.unwrap(), 1);

        assert!(!store.remove_document(999).await.unwrap());
        assert_eq!(store.corpus_version().await.unwrap(), 1);

        assert!(store.remove_document(id).await.unwrap());
        assert_eq!(store.corpus_version().await.unwrap(), 2);
        assert!(store.list_documents().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts() {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(open_store(&tmp).await);

        for round in 0..10 {
            let mut handles = Vec::new();
            for task in 0..5 {
                let store = store.clone();
                handles.push(tokio::spawn(async move {
                    let distinct = NewDocument::new(
                        format!("doc {}-{}", round, task),
                        "src",
                        Genre::Other,
                        "some text",
                    );
                    let shared =
                        NewDocument::new(format!("shared {}", round), "src", Genre::Other, "x");
                    (
                        store.insert_document(&distinct).await,
                        store.insert_document(&shared).await,
                    )
                }));
            }

            let mut shared_added = 0;
            for handle in handles {
                let (distinct, shared) = handle.await.unwrap();
                distinct.unwrap();
                match shared {
                    Ok(_) => shared_added += 1,
                    Err(e) => assert!(
                        e.downcast_ref::<DuplicateTitle>().is_some(),
                        "unexpected error: {:#}",
                        e
                    ),
                }
            }
            assert_eq!(shared_added, 1);
        }

        assert_eq!(store.list_documents().await.unwrap().len(), 60);
        assert_eq!(store.corpus_version().await.unwrap(), 60);
    }

    #[tokio::test]
    async fn test_null_text_and_unknown_genre() {
        let tmp = TempDir::new().unwrap();
        let store = open_store(&tmp).await;

        sqlx::query("INSERT INTO documents (title, source, genre, text) VALUES ('x', 's', 'poetry', NULL)")
            .execute(store.pool())
            .await
            .unwrap();

        let docs = store.list_documents().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].genre, Genre::Other);
        assert!(docs[0].text.is_none());
    }

    #[tokio::test]
    async fn test_engine_sees_changes() {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(open_store(&tmp).await);
        let engine = QueryEngine::new(store.clone(), Default::default());

        store
            .insert_document(&NewDocument::new("A", "s", Genre::News, "The cat sat."))
            .await
            .unwrap();
        assert_eq!(engine.search_frequency("cat").await.unwrap().frequency, 1);

        store
            .insert_document(&NewDocument::new("B", "s", Genre::News, "Another cat."))
            .await
            .unwrap();
        assert_eq!(engine.search_frequency("cat").await.unwrap().frequency, 2);
    }
}
