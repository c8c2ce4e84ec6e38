use std::env;
use std::io::Read;
use std::sync::Arc;

use anyhow::Context;

use adaptive_rag::core::config::Settings;
use adaptive_rag::graph::context::PipelineContext;
use adaptive_rag::llm::openai::OpenAiCompatProvider;
use adaptive_rag::llm::provider::LlmProvider;
use adaptive_rag::pipeline::Pipeline;
use adaptive_rag::rag::sqlite::SqliteStore;
use adaptive_rag::rag::store::VectorStore;
use adaptive_rag::search::{TavilyClient, WebSearch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    adaptive_rag::logging::init();

    let settings = Settings::load("config.toml").context("Failed to load settings")?;

    let question = match env::args().nth(1) {
        Some(q) => q,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read question from stdin")?;
            buf.trim().to_string()
        }
    };
    if question.is_empty() {
        anyhow::bail!("Usage: adaptive-rag <question>");
    }

    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiCompatProvider::new(&settings.llm));
    let store: Arc<dyn VectorStore> = Arc::new(
        SqliteStore::open(&settings.rag.db_path)
            .await
            .context("Failed to open document index")?,
    );
    let search: Arc<dyn WebSearch> = Arc::new(TavilyClient::new(&settings.search));

    let ctx = PipelineContext::new(llm, store, search, &settings);
    let pipeline = Pipeline::new(ctx, settings.graph.max_steps)?;

    let result = pipeline.answer(&question).await?;

    tracing::info!("Answer produced from {} documents", result.documents.len());
    println!("{}", result.answer);

    Ok(())
}
