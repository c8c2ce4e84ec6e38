//! Web search adapter (Tavily).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::config::SearchSettings;
use crate::core::errors::PipelineError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

/// Web search capability. One live network call per invocation; no
/// caching.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, PipelineError>;
}

pub struct TavilyClient {
    api_key: String,
    max_results: usize,
    client: Client,
}

impl TavilyClient {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            max_results: settings.max_results,
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, PipelineError> {
        let res = self
            .client
            .post("https://api.tavily.com/search")
            .bearer_auth(&self.api_key)
            .json(&json!({
                "query": query,
                "max_results": self.max_results,
            }))
            .send()
            .await
            .map_err(PipelineError::search)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Search(format!(
                "tavily search failed ({}): {}",
                status, text
            )));
        }

        let payload: TavilyResponse = res.json().await.map_err(PipelineError::search)?;
        let mut results = payload.results;
        results.truncate(self.max_results);
        Ok(results)
    }
}
