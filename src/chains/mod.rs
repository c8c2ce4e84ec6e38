// Prompt + schema call-sites. Each chain owns its instruction template
// and typed output contract, and issues exactly one model call.

pub mod answer_grader;
pub mod generation;
pub mod hallucination_grader;
pub mod retrieval_grader;
pub mod router;
pub mod verdict;

pub use answer_grader::AnswerGrader;
pub use generation::GenerationChain;
pub use hallucination_grader::HallucinationGrader;
pub use retrieval_grader::RetrievalGrader;
pub use router::{QuestionRouter, RouteTarget};
pub use verdict::Verdict;

use crate::rag::store::Document;

/// Concatenate document contents for prompt interpolation.
pub(crate) fn join_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_documents_concatenates_in_order() {
        let docs = vec![
            Document::new("first"),
            Document::new("second"),
            Document::new("third"),
        ];
        assert_eq!(join_documents(&docs), "first\n\nsecond\n\nthird");
    }

    #[test]
    fn join_documents_empty_set_is_empty_string() {
        assert_eq!(join_documents(&[]), "");
    }
}
