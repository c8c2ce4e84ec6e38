//! Question router chain.
//!
//! Classifies a question as answerable from the vector index or as
//! requiring a live web search.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::errors::PipelineError;
use crate::llm::provider::{chat_structured, LlmProvider};
use crate::llm::types::{ChatMessage, ChatRequest};

const SYSTEM: &str = "You are an expert at routing a user question to a vectorstore or web search.
The vectorstore contains documents related to agents, prompt engineering, and adversarial attacks.
Use the vectorstore for questions on these topics. For all else, use web search.";

/// Retrieval source for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RouteTarget {
    Vectorstore,
    Websearch,
}

impl RouteTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteTarget::Vectorstore => "vectorstore",
            RouteTarget::Websearch => "websearch",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RouteQuery {
    /// Where to send the question: "vectorstore" or "websearch".
    pub datasource: RouteTarget,
}

pub struct QuestionRouter {
    llm: Arc<dyn LlmProvider>,
}

impl QuestionRouter {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// A malformed model response surfaces as `PipelineError::Schema`,
    /// fatal for this invocation.
    pub async fn route(&self, question: &str) -> Result<RouteTarget, PipelineError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM),
            ChatMessage::user(question),
        ]);

        let decision: RouteQuery = chat_structured(self.llm.as_ref(), request).await?;
        Ok(decision.datasource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_query_decodes_both_targets() {
        let v: RouteQuery =
            serde_json::from_str(r#"{"datasource": "vectorstore"}"#).expect("should decode");
        assert_eq!(v.datasource, RouteTarget::Vectorstore);

        let w: RouteQuery =
            serde_json::from_str(r#"{"datasource": "websearch"}"#).expect("should decode");
        assert_eq!(w.datasource, RouteTarget::Websearch);
    }

    #[test]
    fn route_query_rejects_unknown_source() {
        let res: Result<RouteQuery, _> = serde_json::from_str(r#"{"datasource": "wikipedia"}"#);
        assert!(res.is_err());
    }
}
