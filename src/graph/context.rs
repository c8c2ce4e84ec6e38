// Pipeline Context
// Explicit dependency bundle passed by reference to every node.

use std::sync::Arc;

use crate::chains::{
    AnswerGrader, GenerationChain, HallucinationGrader, QuestionRouter, RetrievalGrader,
};
use crate::core::config::Settings;
use crate::llm::provider::LlmProvider;
use crate::rag::retriever::Retriever;
use crate::rag::store::VectorStore;
use crate::search::WebSearch;

/// Everything the nodes call out to: the five chains, the retriever and
/// the web search client. Constructed once at startup; no global state.
pub struct PipelineContext {
    pub router: QuestionRouter,
    pub retrieval_grader: RetrievalGrader,
    pub hallucination_grader: HallucinationGrader,
    pub answer_grader: AnswerGrader,
    pub generation: GenerationChain,
    pub retriever: Retriever,
    pub search: Arc<dyn WebSearch>,
}

impl PipelineContext {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
        search: Arc<dyn WebSearch>,
        settings: &Settings,
    ) -> Self {
        Self {
            router: QuestionRouter::new(llm.clone()),
            retrieval_grader: RetrievalGrader::new(llm.clone()),
            hallucination_grader: HallucinationGrader::new(llm.clone()),
            answer_grader: AnswerGrader::new(llm.clone()),
            generation: GenerationChain::new(llm.clone()),
            retriever: Retriever::new(llm, store, settings.rag.top_k),
            search,
        }
    }
}
