//! Hallucination grader.
//!
//! Checks whether a generated answer is grounded in the supplied
//! evidence set.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::errors::PipelineError;
use crate::llm::provider::{chat_structured, LlmProvider};
use crate::llm::types::{ChatMessage, ChatRequest};
use crate::rag::store::Document;

use super::verdict::Verdict;

const SYSTEM: &str = "You are a grader assessing whether an LLM generation is grounded in / supported by a set of retrieved facts.

Give a binary score 'yes' or 'no'. 'Yes' means that every factual claim in the answer is supported by the set of facts.";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GradeHallucinations {
    /// Answer is grounded in the facts, 'yes' or 'no'.
    pub binary_score: Verdict,
}

pub struct HallucinationGrader {
    llm: Arc<dyn LlmProvider>,
}

impl HallucinationGrader {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    pub async fn grade(
        &self,
        documents: &[Document],
        generation: &str,
    ) -> Result<Verdict, PipelineError> {
        let facts = super::join_documents(documents);
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM),
            ChatMessage::user(format!(
                "Set of facts: \n\n {} \n\n LLM generation: {}",
                facts, generation
            )),
        ]);

        let grade: GradeHallucinations = chat_structured(self.llm.as_ref(), request).await?;
        Ok(grade.binary_score)
    }
}
