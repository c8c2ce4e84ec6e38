//! Answer usefulness grader.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::errors::PipelineError;
use crate::llm::provider::{chat_structured, LlmProvider};
use crate::llm::types::{ChatMessage, ChatRequest};

use super::verdict::Verdict;

const SYSTEM: &str = "You are a grader assessing whether an answer addresses / resolves a question.

Give a binary score 'yes' or 'no'. 'Yes' means that the answer resolves the question.";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GradeAnswer {
    /// Answer addresses the question, 'yes' or 'no'.
    pub binary_score: Verdict,
}

pub struct AnswerGrader {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerGrader {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    pub async fn grade(&self, question: &str, generation: &str) -> Result<Verdict, PipelineError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM),
            ChatMessage::user(format!(
                "User question: \n\n {} \n\n LLM generation: {}",
                question, generation
            )),
        ]);

        let grade: GradeAnswer = chat_structured(self.llm.as_ref(), request).await?;
        Ok(grade.binary_score)
    }
}
