//! VectorStore trait — abstract interface for the document index.
//!
//! The index is populated by an external ingestion pipeline; the pipeline
//! itself only queries it. Insert methods exist so that ingestion and
//! tests can share the same interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::PipelineError;

/// A single evidence unit. Read-only once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The text content.
    pub content: String,
    /// Optional source identifier (URL, filename, "websearch", ...).
    pub source: Option<String>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Result of a similarity search.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    /// Similarity score (higher = better).
    pub score: f32,
}

/// Abstract trait for vector index backends.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert a document with its embedding vector.
    async fn insert(&self, document: Document, embedding: Vec<f32>) -> Result<(), PipelineError>;

    /// Insert multiple documents in batch.
    async fn insert_batch(
        &self,
        items: Vec<(Document, Vec<f32>)>,
    ) -> Result<(), PipelineError>;

    /// Search for documents similar to the query embedding, ordered by
    /// descending similarity.
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, PipelineError>;

    /// Total number of indexed documents.
    async fn count(&self) -> Result<usize, PipelineError>;
}
