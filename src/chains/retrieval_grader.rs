//! Document relevance grader.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::errors::PipelineError;
use crate::llm::provider::{chat_structured, LlmProvider};
use crate::llm::types::{ChatMessage, ChatRequest};

use super::verdict::Verdict;

const SYSTEM: &str = "You are a strict grader assessing relevance of a retrieved document to a user question.

The document must DIRECTLY address the user's question to be considered relevant.
Do NOT grade as relevant if:
- The document only shares a general topic area
- There is only tangential or indirect connection
- The document cannot help answer the specific question asked

Only grade as relevant if the document contains information that directly helps answer the question.

Give a binary score 'yes' or 'no'.";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GradeDocuments {
    /// Documents are relevant to the question, 'yes' or 'no'.
    pub binary_score: Verdict,
}

pub struct RetrievalGrader {
    llm: Arc<dyn LlmProvider>,
}

impl RetrievalGrader {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Grade one document against the question. Applied independently per
    /// document; a failure here does not affect sibling gradings.
    pub async fn grade(&self, document: &str, question: &str) -> Result<Verdict, PipelineError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM),
            ChatMessage::user(format!(
                "Retrieved document: \n\n {} \n\n User question: {}",
                document, question
            )),
        ]);

        let grade: GradeDocuments = chat_structured(self.llm.as_ref(), request).await?;
        Ok(grade.binary_score)
    }
}
