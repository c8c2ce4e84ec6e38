// Retrieve Node
// Vector index lookup for the question.

use async_trait::async_trait;

use crate::graph::context::PipelineContext;
use crate::graph::node::{GraphError, Node, NodeOutput};
use crate::graph::state::GraphState;

pub struct RetrieveNode;

impl RetrieveNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RetrieveNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for RetrieveNode {
    fn id(&self) -> &'static str {
        "retrieve"
    }

    fn name(&self) -> &'static str {
        "Retrieve"
    }

    async fn execute(
        &self,
        state: &mut GraphState,
        ctx: &PipelineContext,
    ) -> Result<NodeOutput, GraphError> {
        tracing::info!("Retrieving documents");

        let documents = ctx
            .retriever
            .retrieve(&state.question)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        tracing::info!("Retrieved {} documents", documents.len());
        state.documents = documents;

        Ok(NodeOutput::Continue)
    }
}
