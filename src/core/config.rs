//! Pipeline configuration.
//!
//! Settings are loaded once at startup from an optional `config.toml` and
//! overridden by environment variables for credentials. The resulting
//! `Settings` value is passed by reference to every component that needs
//! it; there is no global singleton.

use std::env;
use std::path::Path;

use serde::Deserialize;

use super::errors::PipelineError;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub search: SearchSettings,
    pub rag: RagSettings,
    pub graph: GraphSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// OpenAI-compatible endpoint base URL.
    pub base_url: String,
    /// API key; overridden by `LLM_API_KEY`. Never logged.
    pub api_key: String,
    pub model: String,
    pub embed_model: String,
    /// Temperature 0 keeps grader verdicts deterministic.
    pub temperature: f64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            embed_model: "text-embedding-3-small".to_string(),
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Tavily API key; overridden by `TAVILY_API_KEY`.
    pub api_key: String,
    /// Cap on search results merged into the synthetic document.
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_results: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// SQLite file holding the embedded document index.
    pub db_path: String,
    /// Number of documents returned per retrieval.
    pub top_k: usize,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            db_path: "index.db".to_string(),
            top_k: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Upper bound on executed graph steps. The regenerate and re-search
    /// cycles have no natural exit when graders keep failing; hitting
    /// this bound fails the run closed.
    pub max_steps: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self { max_steps: 12 }
    }
}

impl Settings {
    /// Load settings from `path` (if it exists) and apply environment
    /// overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let mut settings = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| PipelineError::Config(format!("read {}: {}", path.display(), e)))?;
            toml::from_str(&raw)
                .map_err(|e| PipelineError::Config(format!("parse {}: {}", path.display(), e)))?
        } else {
            Settings::default()
        };
        settings.apply_env();
        Ok(settings)
    }

    /// Environment-only settings (credentials plus defaults).
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        settings.apply_env();
        settings
    }

    fn apply_env(&mut self) {
        if let Ok(val) = env::var("LLM_API_KEY") {
            self.llm.api_key = val;
        }
        if let Ok(val) = env::var("LLM_BASE_URL") {
            self.llm.base_url = val;
        }
        if let Ok(val) = env::var("LLM_MODEL") {
            self.llm.model = val;
        }
        if let Ok(val) = env::var("LLM_EMBED_MODEL") {
            self.llm.embed_model = val;
        }
        if let Ok(val) = env::var("TAVILY_API_KEY") {
            self.search.api_key = val;
        }
        if let Ok(val) = env::var("RAG_DB_PATH") {
            self.rag.db_path = val;
        }
    }
}
