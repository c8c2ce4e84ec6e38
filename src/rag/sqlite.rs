//! SQLite-backed vector index.
//!
//! Metadata lives in SQLite; similarity search is brute-force cosine
//! over the stored embeddings.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::core::errors::PipelineError;

use super::store::{Document, ScoredDocument, VectorStore};
use super::vector_math::cosine_similarity;

pub struct SqliteStore {
    pool: SqlitePool,
    #[allow(dead_code)]
    db_path: PathBuf,
}

impl SqliteStore {
    pub async fn open(db_path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let db_path = db_path.into();
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(PipelineError::store)?;

        let store = Self { pool, db_path };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), PipelineError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                doc_id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                source TEXT,
                embedding BLOB NOT NULL,
                created_at TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(PipelineError::store)?;

        Ok(())
    }

    fn serialize_embedding(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn row_to_document(row: &sqlx::sqlite::SqliteRow) -> Document {
        Document {
            content: row.get("content"),
            source: row.get("source"),
        }
    }
}

#[async_trait]
impl VectorStore for SqliteStore {
    async fn insert(&self, document: Document, embedding: Vec<f32>) -> Result<(), PipelineError> {
        let blob = Self::serialize_embedding(&embedding);

        sqlx::query(
            "INSERT INTO documents (doc_id, content, source, embedding)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&document.content)
        .bind(&document.source)
        .bind(&blob)
        .execute(&self.pool)
        .await
        .map_err(PipelineError::store)?;

        Ok(())
    }

    async fn insert_batch(
        &self,
        items: Vec<(Document, Vec<f32>)>,
    ) -> Result<(), PipelineError> {
        if items.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(PipelineError::store)?;

        for (document, embedding) in &items {
            let blob = Self::serialize_embedding(embedding);
            sqlx::query(
                "INSERT INTO documents (doc_id, content, source, embedding)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&document.content)
            .bind(&document.source)
            .bind(&blob)
            .execute(&mut *tx)
            .await
            .map_err(PipelineError::store)?;
        }

        tx.commit().await.map_err(PipelineError::store)?;
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, PipelineError> {
        let rows = sqlx::query("SELECT content, source, embedding FROM documents")
            .fetch_all(&self.pool)
            .await
            .map_err(PipelineError::store)?;

        let mut scored: Vec<ScoredDocument> = rows
            .iter()
            .filter_map(|row| {
                let embedding_bytes: Vec<u8> = row.get("embedding");
                if embedding_bytes.is_empty() {
                    return None;
                }
                let stored = Self::deserialize_embedding(&embedding_bytes);
                Some(ScoredDocument {
                    document: Self::row_to_document(row),
                    score: cosine_similarity(query_embedding, &stored),
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit.max(1));

        Ok(scored)
    }

    async fn count(&self) -> Result<usize, PipelineError> {
        let row = sqlx::query("SELECT COUNT(*) as n FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(PipelineError::store)?;
        let n: i64 = row.get("n");
        Ok(n as usize)
    }
}
