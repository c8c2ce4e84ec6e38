// Generate Node
// Answer generation plus the grounding / usefulness gates.

use async_trait::async_trait;

use crate::graph::context::PipelineContext;
use crate::graph::node::{GraphError, Node, NodeOutput, Outcome};
use crate::graph::state::GraphState;

pub struct GenerateNode;

impl GenerateNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenerateNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for GenerateNode {
    fn id(&self) -> &'static str {
        "generate"
    }

    fn name(&self) -> &'static str {
        "Generate"
    }

    async fn execute(
        &self,
        state: &mut GraphState,
        ctx: &PipelineContext,
    ) -> Result<NodeOutput, GraphError> {
        tracing::info!("Generating answer from {} documents", state.documents.len());

        let generation = ctx
            .generation
            .generate(&state.documents, &state.question)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;
        state.generation = Some(generation.clone());

        tracing::info!("Checking generation for grounding");
        let grounded = ctx
            .hallucination_grader
            .grade(&state.documents, &generation)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        if !grounded.is_yes() {
            tracing::info!("Generation not supported by evidence, regenerating");
            return Ok(NodeOutput::Branch(Outcome::NotSupported));
        }

        tracing::info!("Checking generation against the question");
        let useful = ctx
            .answer_grader
            .grade(&state.question, &generation)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        if useful.is_yes() {
            tracing::info!("Generation accepted");
            Ok(NodeOutput::Final)
        } else {
            tracing::info!("Generation does not resolve the question, re-searching");
            Ok(NodeOutput::Branch(Outcome::NotUseful))
        }
    }
}
