use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::errors::PipelineError;

use super::types::ChatRequest;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "openai", "lmstudio")
    fn name(&self) -> &str;

    /// chat completion, plain text response
    async fn chat(&self, request: ChatRequest) -> Result<String, PipelineError>;

    /// chat completion constrained to `schema`; returns the raw JSON text.
    ///
    /// `schema_name` labels the response format for the API and for
    /// decode-error reporting.
    async fn chat_schema(
        &self,
        request: ChatRequest,
        schema_name: &str,
        schema: Value,
    ) -> Result<String, PipelineError>;

    /// generate embeddings
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, PipelineError>;
}

/// Issue a schema-constrained call and decode the response into `T`.
///
/// The schema is derived from `T` via `schemars`. A response that does not
/// decode is a `PipelineError::Schema` carrying the raw model output.
pub async fn chat_structured<T>(
    provider: &dyn LlmProvider,
    request: ChatRequest,
) -> Result<T, PipelineError>
where
    T: DeserializeOwned + JsonSchema,
{
    let schema_name = T::schema_name();
    let schema = serde_json::to_value(schemars::schema_for!(T))
        .map_err(|e| PipelineError::Llm(format!("schema serialization: {}", e)))?;

    let raw = provider.chat_schema(request, &schema_name, schema).await?;

    serde_json::from_str(&raw).map_err(|source| PipelineError::Schema {
        expected: schema_name.to_string(),
        raw,
        source,
    })
}
