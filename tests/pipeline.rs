// End-to-end graph tests against scripted mock providers.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use adaptive_rag::core::config::Settings;
use adaptive_rag::core::errors::PipelineError;
use adaptive_rag::graph::context::PipelineContext;
use adaptive_rag::llm::provider::LlmProvider;
use adaptive_rag::llm::types::ChatRequest;
use adaptive_rag::pipeline::Pipeline;
use adaptive_rag::rag::store::{Document, ScoredDocument, VectorStore};
use adaptive_rag::rag::vector_math::cosine_similarity;
use adaptive_rag::search::{SearchResult, WebSearch};

const GENERATION: &str = "Agents combine planning, memory, and tool use.";

/// Scripted LLM provider. `chat_schema` responses are dequeued per schema
/// name; the last response for a name repeats once the script runs out,
/// so a persistent verdict can be expressed with a single entry.
struct MockProvider {
    scripts: Mutex<HashMap<String, VecDeque<String>>>,
}

impl MockProvider {
    fn new(scripts: Vec<(&str, Vec<&str>)>) -> Self {
        let scripts = scripts
            .into_iter()
            .map(|(name, responses)| {
                (
                    name.to_string(),
                    responses.into_iter().map(String::from).collect(),
                )
            })
            .collect();
        Self {
            scripts: Mutex::new(scripts),
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, _request: ChatRequest) -> Result<String, PipelineError> {
        Ok(GENERATION.to_string())
    }

    async fn chat_schema(
        &self,
        _request: ChatRequest,
        schema_name: &str,
        _schema: Value,
    ) -> Result<String, PipelineError> {
        let mut scripts = self.scripts.lock().expect("scripts lock");
        let queue = scripts
            .get_mut(schema_name)
            .unwrap_or_else(|| panic!("no script for schema '{}'", schema_name));
        if queue.len() > 1 {
            Ok(queue.pop_front().expect("nonempty queue"))
        } else {
            Ok(queue.front().expect("script exhausted").clone())
        }
    }

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        Ok(inputs.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

struct MockStore {
    items: Vec<(Document, Vec<f32>)>,
}

impl MockStore {
    fn with_documents(contents: &[&str]) -> Self {
        Self {
            items: contents
                .iter()
                .map(|c| (Document::new(*c), vec![1.0, 0.0]))
                .collect(),
        }
    }
}

#[async_trait]
impl VectorStore for MockStore {
    async fn insert(&self, _document: Document, _embedding: Vec<f32>) -> Result<(), PipelineError> {
        unimplemented!("read-only test store")
    }

    async fn insert_batch(
        &self,
        _items: Vec<(Document, Vec<f32>)>,
    ) -> Result<(), PipelineError> {
        unimplemented!("read-only test store")
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredDocument>, PipelineError> {
        let mut scored: Vec<ScoredDocument> = self
            .items
            .iter()
            .map(|(document, embedding)| ScoredDocument {
                document: document.clone(),
                score: cosine_similarity(query_embedding, embedding),
            })
            .collect();
        scored.truncate(limit);
        Ok(scored)
    }

    async fn count(&self) -> Result<usize, PipelineError> {
        Ok(self.items.len())
    }
}

struct MockSearch {
    calls: AtomicUsize,
}

impl MockSearch {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            SearchResult {
                title: "one".into(),
                url: "https://example.com/1".into(),
                content: "web one".into(),
            },
            SearchResult {
                title: "two".into(),
                url: "https://example.com/2".into(),
                content: "web two".into(),
            },
            SearchResult {
                title: "three".into(),
                url: "https://example.com/3".into(),
                content: "web three".into(),
            },
        ])
    }
}

fn build_pipeline(
    provider: MockProvider,
    store: MockStore,
    search: Arc<MockSearch>,
) -> Pipeline {
    let settings = Settings::default();
    let ctx = PipelineContext::new(Arc::new(provider), Arc::new(store), search, &settings);
    Pipeline::new(ctx, settings.graph.max_steps).expect("pipeline should build")
}

#[tokio::test]
async fn vectorstore_route_happy_path() {
    let provider = MockProvider::new(vec![
        ("RouteQuery", vec![r#"{"datasource": "vectorstore"}"#]),
        ("GradeDocuments", vec![r#"{"binary_score": "yes"}"#]),
        ("GradeHallucinations", vec![r#"{"binary_score": "yes"}"#]),
        ("GradeAnswer", vec![r#"{"binary_score": "yes"}"#]),
    ]);
    let store = MockStore::with_documents(&["agents doc", "prompting doc"]);
    let search = Arc::new(MockSearch::new());

    let pipeline = build_pipeline(provider, store, search.clone());
    let result = pipeline
        .answer("What are the key components of an agent system?")
        .await
        .expect("pipeline should succeed");

    assert_eq!(result.answer, GENERATION);
    assert_eq!(result.documents.len(), 2);
    assert_eq!(search.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn dropped_document_triggers_websearch_and_appends_one() {
    let provider = MockProvider::new(vec![
        ("RouteQuery", vec![r#"{"datasource": "vectorstore"}"#]),
        (
            "GradeDocuments",
            vec![r#"{"binary_score": "yes"}"#, r#"{"binary_score": "no"}"#],
        ),
        ("GradeHallucinations", vec![r#"{"binary_score": "yes"}"#]),
        ("GradeAnswer", vec![r#"{"binary_score": "yes"}"#]),
    ]);
    let store = MockStore::with_documents(&["relevant doc", "irrelevant doc"]);
    let search = Arc::new(MockSearch::new());

    let pipeline = build_pipeline(provider, store, search.clone());
    let result = pipeline
        .answer("What is prompt injection?")
        .await
        .expect("pipeline should succeed");

    // One kept document plus exactly one appended synthetic document.
    assert_eq!(result.documents.len(), 2);
    assert_eq!(result.documents[0].content, "relevant doc");
    assert_eq!(
        result.documents[1].source.as_deref(),
        Some("websearch")
    );
    assert_eq!(result.documents[1].content, "web one\nweb two\nweb three");
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn websearch_route_builds_single_synthetic_document() {
    let provider = MockProvider::new(vec![
        ("RouteQuery", vec![r#"{"datasource": "websearch"}"#]),
        ("GradeHallucinations", vec![r#"{"binary_score": "yes"}"#]),
        ("GradeAnswer", vec![r#"{"binary_score": "yes"}"#]),
    ]);
    let store = MockStore::with_documents(&[]);
    let search = Arc::new(MockSearch::new());

    let pipeline = build_pipeline(provider, store, search.clone());
    let result = pipeline
        .answer("What is the current weather in Tokyo?")
        .await
        .expect("pipeline should succeed");

    assert_eq!(result.documents.len(), 1);
    assert_eq!(result.documents[0].content, "web one\nweb two\nweb three");
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn persistent_ungrounded_generation_fails_closed() {
    let provider = MockProvider::new(vec![
        ("RouteQuery", vec![r#"{"datasource": "vectorstore"}"#]),
        ("GradeDocuments", vec![r#"{"binary_score": "yes"}"#]),
        ("GradeHallucinations", vec![r#"{"binary_score": "no"}"#]),
    ]);
    let store = MockStore::with_documents(&["some doc"]);
    let search = Arc::new(MockSearch::new());

    let pipeline = build_pipeline(provider, store, search.clone());
    let err = pipeline
        .answer("What are adversarial attacks?")
        .await
        .expect_err("regeneration loop must hit the step bound");

    match err {
        PipelineError::Graph(msg) => assert!(msg.contains("Maximum steps")),
        other => panic!("expected graph error, got: {}", other),
    }
}

#[tokio::test]
async fn not_useful_generation_resolves_via_websearch() {
    let provider = MockProvider::new(vec![
        ("RouteQuery", vec![r#"{"datasource": "vectorstore"}"#]),
        ("GradeDocuments", vec![r#"{"binary_score": "yes"}"#]),
        ("GradeHallucinations", vec![r#"{"binary_score": "yes"}"#]),
        (
            "GradeAnswer",
            vec![r#"{"binary_score": "no"}"#, r#"{"binary_score": "yes"}"#],
        ),
    ]);
    let store = MockStore::with_documents(&["partial doc"]);
    let search = Arc::new(MockSearch::new());

    let pipeline = build_pipeline(provider, store, search.clone());
    let result = pipeline
        .answer("How do agents use tools?")
        .await
        .expect("pipeline should succeed");

    assert_eq!(result.answer, GENERATION);
    // Evidence grew by the single re-search document, nothing was dropped.
    assert_eq!(result.documents.len(), 2);
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_router_output_is_a_schema_error() {
    let provider = MockProvider::new(vec![(
        "RouteQuery",
        vec![r#"{"datasource": "wikipedia"}"#],
    )]);
    let store = MockStore::with_documents(&["doc"]);
    let search = Arc::new(MockSearch::new());

    let pipeline = build_pipeline(provider, store, search.clone());
    let err = pipeline
        .answer("What is RAG?")
        .await
        .expect_err("unknown datasource must fail");

    // The schema failure surfaces through the graph error, fatal for the run.
    assert!(err.to_string().contains("RouteQuery"));
}
