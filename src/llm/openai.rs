use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::config::LlmSettings;
use crate::core::errors::PipelineError;

use super::provider::LlmProvider;
use super::types::ChatRequest;

/// Provider for any OpenAI-compatible chat/embeddings endpoint.
#[derive(Clone)]
pub struct OpenAiCompatProvider {
    base_url: String,
    api_key: String,
    model: String,
    embed_model: String,
    temperature: f64,
    client: Client,
}

impl OpenAiCompatProvider {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            embed_model: settings.embed_model.clone(),
            temperature: settings.temperature,
            client: Client::new(),
        }
    }

    fn chat_body(&self, request: &ChatRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": false,
        });

        let temperature = request.temperature.unwrap_or(self.temperature);
        if let Some(obj) = body.as_object_mut() {
            obj.insert("temperature".to_string(), json!(temperature));
            if let Some(t) = request.max_tokens {
                obj.insert("max_tokens".to_string(), json!(t));
            }
        }

        body
    }

    async fn post_chat(&self, body: Value) -> Result<String, PipelineError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::llm)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Llm(format!(
                "chat completion failed ({}): {}",
                status, text
            )));
        }

        let payload: ChatCompletionResponse = res.json().await.map_err(PipelineError::llm)?;
        let content = payload
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| PipelineError::Llm("chat completion returned no choices".to_string()))?;

        Ok(content)
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRecord>,
}

#[derive(Deserialize)]
struct EmbeddingRecord {
    embedding: Vec<f32>,
}

#[async_trait]
impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, PipelineError> {
        let body = self.chat_body(&request);
        self.post_chat(body).await
    }

    async fn chat_schema(
        &self,
        request: ChatRequest,
        schema_name: &str,
        schema: Value,
    ) -> Result<String, PipelineError> {
        let mut body = self.chat_body(&request);
        if let Some(obj) = body.as_object_mut() {
            obj.insert(
                "response_format".to_string(),
                json!({
                    "type": "json_schema",
                    "json_schema": {
                        "name": schema_name,
                        "schema": schema,
                        "strict": true,
                    }
                }),
            );
        }
        self.post_chat(body).await
    }

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        let url = format!("{}/v1/embeddings", self.base_url);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.embed_model,
                "input": inputs,
            }))
            .send()
            .await
            .map_err(PipelineError::llm)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Llm(format!(
                "embeddings failed ({}): {}",
                status, text
            )));
        }

        let payload: EmbeddingsResponse = res.json().await.map_err(PipelineError::llm)?;
        Ok(payload.data.into_iter().map(|d| d.embedding).collect())
    }
}
