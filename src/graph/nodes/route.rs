// Route Node
// Entry point that classifies the question's retrieval source.

use async_trait::async_trait;

use crate::chains::RouteTarget;
use crate::graph::context::PipelineContext;
use crate::graph::node::{GraphError, Node, NodeOutput, Outcome};
use crate::graph::state::GraphState;

pub struct RouteNode;

impl RouteNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RouteNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for RouteNode {
    fn id(&self) -> &'static str {
        "route"
    }

    fn name(&self) -> &'static str {
        "Question Router"
    }

    async fn execute(
        &self,
        state: &mut GraphState,
        ctx: &PipelineContext,
    ) -> Result<NodeOutput, GraphError> {
        tracing::info!("Routing question");

        let target = ctx
            .router
            .route(&state.question)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        let outcome = match target {
            RouteTarget::Websearch => Outcome::ToWebsearch,
            RouteTarget::Vectorstore => Outcome::ToRetrieve,
        };

        tracing::info!("Router decision: {}", target.as_str());
        Ok(NodeOutput::Branch(outcome))
    }
}
