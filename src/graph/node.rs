// Node trait and types
// Base abstraction for graph nodes

use async_trait::async_trait;

use crate::core::errors::PipelineError;

use super::context::PipelineContext;
use super::state::GraphState;

/// Branch outcome produced by a node. Conditional edges are keyed on
/// this enum; the transition table is validated when the graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    ToRetrieve,
    ToWebsearch,
    ToGenerate,
    NotUseful,
    NotSupported,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::ToRetrieve => "to_retrieve",
            Outcome::ToWebsearch => "to_websearch",
            Outcome::ToGenerate => "to_generate",
            Outcome::NotUseful => "not useful",
            Outcome::NotSupported => "not supported",
        }
    }
}

/// Output from a node execution
#[derive(Debug, Clone)]
pub enum NodeOutput {
    /// Continue along the default edge
    Continue,
    /// Branch to the edge keyed on this outcome
    Branch(Outcome),
    /// Graph execution complete
    Final,
    /// Error occurred
    Error(String),
}

/// Graph execution error
///
/// Includes an `execution_trace` recording the node IDs visited before
/// the error occurred.
#[derive(Debug, Clone)]
pub struct GraphError {
    pub node_id: String,
    pub message: String,
    /// Ordered list of node IDs executed before this error, most-recent last.
    pub execution_trace: Vec<String>,
}

impl GraphError {
    pub fn new(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            message: message.into(),
            execution_trace: Vec::new(),
        }
    }

    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.execution_trace = trace;
        self
    }
}

impl From<GraphError> for PipelineError {
    fn from(err: GraphError) -> Self {
        PipelineError::Graph(err.to_string())
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.execution_trace.is_empty() {
            write!(f, "GraphError in {}: {}", self.node_id, self.message)
        } else {
            write!(
                f,
                "GraphError in {} (trace: {}): {}",
                self.node_id,
                self.execution_trace.join(" -> "),
                self.message
            )
        }
    }
}

impl std::error::Error for GraphError {}

/// Node trait - all graph nodes implement this
#[async_trait]
pub trait Node: Send + Sync {
    /// Unique identifier for this node
    fn id(&self) -> &'static str;

    /// Human-readable name for display
    fn name(&self) -> &'static str {
        self.id()
    }

    /// Execute the node logic
    async fn execute(
        &self,
        state: &mut GraphState,
        ctx: &PipelineContext,
    ) -> Result<NodeOutput, GraphError>;
}
