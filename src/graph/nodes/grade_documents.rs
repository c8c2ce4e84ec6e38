// Grade Documents Node
// Per-document relevance filtering over the evidence set.

use async_trait::async_trait;

use crate::graph::context::PipelineContext;
use crate::graph::node::{GraphError, Node, NodeOutput, Outcome};
use crate::graph::state::GraphState;

pub struct GradeDocumentsNode;

impl GradeDocumentsNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GradeDocumentsNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for GradeDocumentsNode {
    fn id(&self) -> &'static str {
        "grade_documents"
    }

    fn name(&self) -> &'static str {
        "Grade Documents"
    }

    async fn execute(
        &self,
        state: &mut GraphState,
        ctx: &PipelineContext,
    ) -> Result<NodeOutput, GraphError> {
        tracing::info!("Grading {} documents for relevance", state.documents.len());

        // Graded one at a time; each verdict is independent of siblings.
        let documents = std::mem::take(&mut state.documents);
        let mut retained = Vec::with_capacity(documents.len());
        let mut dropped = 0usize;

        for document in documents {
            let verdict = ctx
                .retrieval_grader
                .grade(&document.content, &state.question)
                .await
                .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

            if verdict.is_yes() {
                retained.push(document);
            } else {
                dropped += 1;
            }
        }

        // Anything dropped (or nothing retained at all) means the evidence
        // needs web-search supplementation.
        state.web_search = dropped > 0 || retained.is_empty();
        tracing::info!(
            "Relevance grading kept {} documents, dropped {}",
            retained.len(),
            dropped
        );
        state.documents = retained;

        let outcome = if state.web_search {
            Outcome::ToWebsearch
        } else {
            Outcome::ToGenerate
        };

        Ok(NodeOutput::Branch(outcome))
    }
}
