// Graph State
// The single mutable record threaded through every node.

use crate::rag::store::Document;

/// Main graph state.
///
/// Fields are additive: nodes overwrite or append, never delete. The
/// evidence set, once non-empty, is only ever extended.
#[derive(Debug, Clone)]
pub struct GraphState {
    /// The user's question. Set at graph entry, never mutated.
    pub question: String,
    /// Ordered evidence set.
    pub documents: Vec<Document>,
    /// Latest generated answer, if any.
    pub generation: Option<String>,
    /// Set by document grading when the evidence needs web-search
    /// supplementation; consulted for a single branch decision.
    pub web_search: bool,
}

impl GraphState {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            documents: Vec::new(),
            generation: None,
            web_search: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = GraphState::new("what is an agent?");
        assert_eq!(state.question, "what is an agent?");
        assert!(state.documents.is_empty());
        assert!(state.generation.is_none());
        assert!(!state.web_search);
    }
}
