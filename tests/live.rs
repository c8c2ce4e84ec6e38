// Live chain tests against a real model endpoint.
//
// Ignored by default; run with `cargo test -- --ignored` with
// LLM_API_KEY (and optionally LLM_BASE_URL / LLM_MODEL) set.

use std::sync::Arc;

use adaptive_rag::chains::{QuestionRouter, RetrievalGrader, RouteTarget};
use adaptive_rag::core::config::Settings;
use adaptive_rag::llm::openai::OpenAiCompatProvider;
use adaptive_rag::llm::provider::LlmProvider;

fn live_provider() -> Arc<dyn LlmProvider> {
    let settings = Settings::from_env();
    Arc::new(OpenAiCompatProvider::new(&settings.llm))
}

#[tokio::test]
#[ignore]
async fn router_sends_index_topics_to_vectorstore() {
    let router = QuestionRouter::new(live_provider());
    let target = router
        .route("What is the difference between RAG and fine-tuning?")
        .await
        .expect("route call");
    assert_eq!(target, RouteTarget::Vectorstore);
}

#[tokio::test]
#[ignore]
async fn router_sends_current_events_to_websearch() {
    let router = QuestionRouter::new(live_provider());
    let target = router
        .route("What is the current weather in Tokyo?")
        .await
        .expect("route call");
    assert_eq!(target, RouteTarget::Websearch);
}

#[tokio::test]
#[ignore]
async fn relevance_grader_rejects_off_topic_question() {
    let grader = RetrievalGrader::new(live_provider());
    let document = "LLM-powered autonomous agents combine planning, memory, \
                    and tool use to decompose and execute complex tasks.";
    let verdict = grader
        .grade(document, "how to cook pasta with mushrooms")
        .await
        .expect("grade call");
    assert!(!verdict.is_yes());
}

#[tokio::test]
#[ignore]
async fn relevance_grader_accepts_on_topic_question() {
    let grader = RetrievalGrader::new(live_provider());
    let document = "LLM-powered autonomous agents combine planning, memory, \
                    and tool use to decompose and execute complex tasks.";
    let verdict = grader
        .grade(
            document,
            "What are the key components of an LLM-powered autonomous agent system?",
        )
        .await
        .expect("grade call");
    assert!(verdict.is_yes());
}
