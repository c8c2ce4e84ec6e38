// Graph Module
// LangGraph-style StateGraph architecture for the adaptive RAG pipeline

pub mod builder;
pub mod context;
pub mod node;
pub mod nodes;
pub mod runtime;
pub mod state;

pub use builder::build_pipeline_graph;
pub use context::PipelineContext;
pub use node::{GraphError, Node, NodeOutput, Outcome};
pub use runtime::{EdgeCondition, GraphBuilder, GraphRuntime};
pub use state::GraphState;
