use thiserror::Error;

/// Error taxonomy for the pipeline.
///
/// Everything here is fatal for the current question: no retries, no
/// backoff. Callers propagate with `?` and let the binary surface the
/// error.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("llm error: {0}")]
    Llm(String),
    #[error("model response did not match schema '{expected}': {source} (raw: {raw})")]
    Schema {
        expected: String,
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("web search error: {0}")]
    Search(String),
    #[error("vector store error: {0}")]
    Store(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("graph execution failed: {0}")]
    Graph(String),
}

impl PipelineError {
    pub fn llm<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Llm(err.to_string())
    }

    pub fn search<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Search(err.to_string())
    }

    pub fn store<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Store(err.to_string())
    }
}
