// Graph Runtime - petgraph based
// Type-safe StateGraph execution engine

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::context::PipelineContext;
use super::node::{GraphError, Node, NodeOutput, Outcome};
use super::state::GraphState;

/// Edge condition for graph routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeCondition {
    /// Always follow this edge (default edge)
    Always,
    /// Follow this edge when the node branches with this outcome
    OnOutcome(Outcome),
}

impl EdgeCondition {
    pub fn matches(&self, outcome: Option<Outcome>) -> bool {
        match (self, outcome) {
            (EdgeCondition::Always, None) => true,
            (EdgeCondition::OnOutcome(expected), Some(actual)) => *expected == actual,
            _ => false,
        }
    }
}

/// petgraph-based StateGraph runtime
pub struct GraphRuntime {
    /// The underlying directed graph
    graph: DiGraph<Box<dyn Node>, EdgeCondition>,
    /// Map from node ID to NodeIndex for lookup
    node_indices: HashMap<String, NodeIndex>,
    /// Entry point node ID
    entry_node_id: String,
    /// Maximum execution steps. Bounds the regenerate and re-search
    /// cycles; exceeding it fails the run closed.
    max_steps: usize,
}

impl GraphRuntime {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            entry_node_id: String::new(),
            max_steps: 12,
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Box<dyn Node>) -> NodeIndex {
        let id = node.id().to_string();
        let index = self.graph.add_node(node);
        self.node_indices.insert(id, index);
        index
    }

    /// Add a conditional edge between two nodes
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        condition: EdgeCondition,
    ) -> Result<(), GraphError> {
        let from_idx = self
            .node_indices
            .get(from)
            .ok_or_else(|| GraphError::new(from, format!("Source node not found: {}", from)))?;
        let to_idx = self
            .node_indices
            .get(to)
            .ok_or_else(|| GraphError::new(to, format!("Target node not found: {}", to)))?;

        self.graph.add_edge(*from_idx, *to_idx, condition);
        Ok(())
    }

    /// Get node by ID
    pub fn get_node(&self, node_id: &str) -> Option<&dyn Node> {
        self.node_indices
            .get(node_id)
            .and_then(|idx| self.graph.node_weight(*idx))
            .map(|boxed| boxed.as_ref())
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> Vec<&str> {
        self.node_indices.keys().map(|s| s.as_str()).collect()
    }

    /// Check for cycles in the graph
    pub fn has_cycle(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Execute the graph sequentially until a node returns `Final` or the
    /// step bound is exceeded.
    pub async fn run(
        &self,
        state: &mut GraphState,
        ctx: &PipelineContext,
    ) -> Result<(), GraphError> {
        if self.entry_node_id.is_empty() {
            return Err(GraphError::new("runtime", "No entry node set"));
        }

        let mut current_idx = *self.node_indices.get(&self.entry_node_id).ok_or_else(|| {
            GraphError::new(
                "runtime",
                format!("Entry node not found: {}", self.entry_node_id),
            )
        })?;

        let mut step = 0;
        let mut trace: Vec<String> = Vec::new();

        loop {
            if step >= self.max_steps {
                return Err(GraphError::new(
                    "runtime",
                    format!("Maximum steps ({}) exceeded", self.max_steps),
                )
                .with_trace(trace));
            }

            let node = self
                .graph
                .node_weight(current_idx)
                .ok_or_else(|| GraphError::new("runtime", "Node not found in graph"))?;

            let node_id = node.id();
            tracing::debug!("Executing node: {} (step {})", node_id, step);

            let output = node
                .execute(state, ctx)
                .await
                .map_err(|err| err.with_trace(trace.clone()))?;
            trace.push(node_id.to_string());

            match output {
                NodeOutput::Final => {
                    tracing::debug!("Graph execution complete at node: {}", node_id);
                    return Ok(());
                }
                NodeOutput::Error(msg) => {
                    return Err(GraphError::new(node_id, msg).with_trace(trace));
                }
                NodeOutput::Continue => {
                    current_idx = self
                        .resolve_next_node(current_idx, None)
                        .map_err(|err| err.with_trace(trace.clone()))?;
                }
                NodeOutput::Branch(outcome) => {
                    current_idx = self
                        .resolve_next_node(current_idx, Some(outcome))
                        .map_err(|err| err.with_trace(trace.clone()))?;
                }
            }

            step += 1;
        }
    }

    /// Resolve the next node based on edges
    fn resolve_next_node(
        &self,
        current_idx: NodeIndex,
        outcome: Option<Outcome>,
    ) -> Result<NodeIndex, GraphError> {
        let current_id = self
            .graph
            .node_weight(current_idx)
            .map(|n| n.id())
            .unwrap_or("unknown");

        let mut edges_with_targets: Vec<(NodeIndex, EdgeCondition)> = Vec::new();
        for edge_ref in self.graph.edges_directed(current_idx, Direction::Outgoing) {
            edges_with_targets.push((edge_ref.target(), *edge_ref.weight()));
        }

        if edges_with_targets.is_empty() {
            return Err(GraphError::new(
                current_id,
                format!("No outgoing edges from node: {}", current_id),
            ));
        }

        // First, find an edge matching the outcome
        if let Some(outcome) = outcome {
            for (target_idx, weight) in &edges_with_targets {
                if weight.matches(Some(outcome)) {
                    return Ok(*target_idx);
                }
            }
        }

        // Fall back to the default (Always) edge
        for (target_idx, weight) in &edges_with_targets {
            if *weight == EdgeCondition::Always {
                if let Some(outcome) = outcome {
                    tracing::warn!(
                        "Outcome '{}' not matched for node '{}', using default edge",
                        outcome.as_str(),
                        current_id
                    );
                }
                return Ok(*target_idx);
            }
        }

        Err(GraphError::new(
            current_id,
            format!(
                "No matching edge for outcome: {}",
                outcome.map(|o| o.as_str()).unwrap_or("(none)")
            ),
        ))
    }
}

impl Default for GraphRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing graphs fluently
pub struct GraphBuilder {
    runtime: GraphRuntime,
    pending_edges: Vec<(String, String, EdgeCondition)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            runtime: GraphRuntime::new(),
            pending_edges: Vec::new(),
        }
    }

    pub fn entry(mut self, node_id: impl Into<String>) -> Self {
        self.runtime.entry_node_id = node_id.into();
        self
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.runtime.max_steps = max_steps;
        self
    }

    pub fn node(mut self, node: Box<dyn Node>) -> Self {
        self.runtime.add_node(node);
        self
    }

    pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.pending_edges
            .push((from.into(), to.into(), EdgeCondition::Always));
        self
    }

    pub fn conditional_edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        self.pending_edges
            .push((from.into(), to.into(), EdgeCondition::OnOutcome(outcome)));
        self
    }

    /// Wire the pending edges; endpoints naming unknown nodes fail here.
    pub fn build(mut self) -> Result<GraphRuntime, GraphError> {
        for (from, to, condition) in self.pending_edges {
            self.runtime.add_edge(&from, &to, condition)?;
        }
        Ok(self.runtime)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[test]
    fn edge_condition_matching() {
        assert!(EdgeCondition::Always.matches(None));
        assert!(!EdgeCondition::Always.matches(Some(Outcome::ToGenerate)));

        let cond = EdgeCondition::OnOutcome(Outcome::ToWebsearch);
        assert!(cond.matches(Some(Outcome::ToWebsearch)));
        assert!(!cond.matches(Some(Outcome::ToGenerate)));
        assert!(!cond.matches(None));
    }

    struct StubNode;

    #[async_trait]
    impl Node for StubNode {
        fn id(&self) -> &'static str {
            "stub"
        }

        async fn execute(
            &self,
            _state: &mut GraphState,
            _ctx: &PipelineContext,
        ) -> Result<NodeOutput, GraphError> {
            Ok(NodeOutput::Final)
        }
    }

    #[test]
    fn build_rejects_edge_to_unknown_node() {
        let result = GraphBuilder::new()
            .entry("stub")
            .node(Box::new(StubNode))
            .edge("stub", "missing")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn build_registers_nodes() {
        let runtime = GraphBuilder::new()
            .entry("stub")
            .node(Box::new(StubNode))
            .build()
            .expect("build should succeed");
        assert!(runtime.get_node("stub").is_some());
        assert_eq!(runtime.node_ids(), vec!["stub"]);
        assert!(!runtime.has_cycle());
    }
}
