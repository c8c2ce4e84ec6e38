//! Retriever adapter over the vector index.

use std::sync::Arc;

use crate::core::errors::PipelineError;
use crate::llm::provider::LlmProvider;

use super::store::{Document, VectorStore};

pub struct Retriever {
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl Retriever {
    pub fn new(llm: Arc<dyn LlmProvider>, store: Arc<dyn VectorStore>, top_k: usize) -> Self {
        Self { llm, store, top_k }
    }

    /// Return the documents most similar to the question, ordered by
    /// descending similarity. Index errors propagate unhandled.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<Document>, PipelineError> {
        let embeddings = self.llm.embed(&[question.to_string()]).await?;
        let query_embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::Llm("embedding call returned no vectors".to_string()))?;

        let scored = self.store.search(&query_embedding, self.top_k).await?;
        Ok(scored.into_iter().map(|s| s.document).collect())
    }
}
