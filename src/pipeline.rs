//! Pipeline entry point.

use crate::core::errors::PipelineError;
use crate::graph::builder::build_pipeline_graph;
use crate::graph::context::PipelineContext;
use crate::graph::runtime::GraphRuntime;
use crate::graph::state::GraphState;
use crate::rag::store::Document;

/// Final result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineAnswer {
    pub answer: String,
    /// The evidence set the answer was generated from.
    pub documents: Vec<Document>,
}

pub struct Pipeline {
    runtime: GraphRuntime,
    ctx: PipelineContext,
}

impl Pipeline {
    pub fn new(ctx: PipelineContext, max_steps: usize) -> Result<Self, PipelineError> {
        let runtime = build_pipeline_graph(max_steps)?;
        Ok(Self { runtime, ctx })
    }

    /// Answer one question. Builds a fresh graph state, runs the graph to
    /// completion, and returns the accepted generation with its evidence.
    pub async fn answer(&self, question: &str) -> Result<PipelineAnswer, PipelineError> {
        let mut state = GraphState::new(question);
        self.runtime.run(&mut state, &self.ctx).await?;

        let answer = state
            .generation
            .ok_or_else(|| PipelineError::Graph("graph terminated without a generation".into()))?;

        Ok(PipelineAnswer {
            answer,
            documents: state.documents,
        })
    }
}
