//! Answer generation chain.

use std::sync::Arc;

use crate::core::errors::PipelineError;
use crate::llm::provider::LlmProvider;
use crate::llm::types::{ChatMessage, ChatRequest};
use crate::rag::store::Document;

const SYSTEM: &str = "You are an assistant for question-answering tasks.
Use the following pieces of retrieved context to answer the question.
If you don't know the answer, just say that you don't know.
Keep the answer concise.";

pub struct GenerationChain {
    llm: Arc<dyn LlmProvider>,
}

impl GenerationChain {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Generate an answer from the full evidence set. All document content
    /// is concatenated into the context; no truncation is applied.
    pub async fn generate(
        &self,
        documents: &[Document],
        question: &str,
    ) -> Result<String, PipelineError> {
        let context = super::join_documents(documents);
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM),
            ChatMessage::user(format!(
                "Question: {} \n\n Context: {} \n\n Answer:",
                question, context
            )),
        ]);

        self.llm.chat(request).await
    }
}
