// Graph Builder
// Constructs the adaptive RAG graph using petgraph

use super::node::{GraphError, Outcome};
use super::nodes::{GenerateNode, GradeDocumentsNode, RetrieveNode, RouteNode, WebSearchNode};
use super::runtime::{GraphBuilder, GraphRuntime};

/// Build the pipeline graph.
///
/// Entry routes the question; retrieval feeds document grading; grading
/// either proceeds to generation or falls back to web search; generation
/// self-loops while ungrounded and re-searches while not useful. A useful
/// generation terminates the graph. `max_steps` bounds both cycles.
pub fn build_pipeline_graph(max_steps: usize) -> Result<GraphRuntime, GraphError> {
    GraphBuilder::new()
        .entry("route")
        .max_steps(max_steps)
        .node(Box::new(RouteNode::new()))
        .node(Box::new(RetrieveNode::new()))
        .node(Box::new(GradeDocumentsNode::new()))
        .node(Box::new(GenerateNode::new()))
        .node(Box::new(WebSearchNode::new()))
        // Entry routing
        .conditional_edge("route", "retrieve", Outcome::ToRetrieve)
        .conditional_edge("route", "web_search", Outcome::ToWebsearch)
        // Retrieval always flows into grading
        .edge("retrieve", "grade_documents")
        // Grading either generates or supplements via web search
        .conditional_edge("grade_documents", "generate", Outcome::ToGenerate)
        .conditional_edge("grade_documents", "web_search", Outcome::ToWebsearch)
        // Ungrounded generations regenerate; un-useful ones re-search
        .conditional_edge("generate", "generate", Outcome::NotSupported)
        .conditional_edge("generate", "web_search", Outcome::NotUseful)
        // Web search always flows into generation
        .edge("web_search", "generate")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_graph_builds() {
        let runtime = build_pipeline_graph(12).expect("graph should build");
        let mut ids = runtime.node_ids();
        ids.sort_unstable();
        assert_eq!(
            ids,
            vec!["generate", "grade_documents", "retrieve", "route", "web_search"]
        );
        // The regenerate and re-search loops make the graph cyclic.
        assert!(runtime.has_cycle());
    }
}
