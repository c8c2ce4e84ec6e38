// Web Search Node
// Supplements the evidence set with one synthetic document.

use async_trait::async_trait;

use crate::graph::context::PipelineContext;
use crate::graph::node::{GraphError, Node, NodeOutput};
use crate::graph::state::GraphState;
use crate::rag::store::Document;

pub struct WebSearchNode;

impl WebSearchNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebSearchNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for WebSearchNode {
    fn id(&self) -> &'static str {
        "web_search"
    }

    fn name(&self) -> &'static str {
        "Web Search"
    }

    async fn execute(
        &self,
        state: &mut GraphState,
        ctx: &PipelineContext,
    ) -> Result<NodeOutput, GraphError> {
        tracing::info!("Executing web search");

        let results = ctx
            .search
            .search(&state.question)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        tracing::info!("Web search returned {} results", results.len());

        // One synthetic document per invocation, appended to any existing
        // evidence rather than replacing it.
        let joined = results
            .iter()
            .map(|r| r.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        state
            .documents
            .push(Document::new(joined).with_source("websearch"));

        Ok(NodeOutput::Continue)
    }
}
