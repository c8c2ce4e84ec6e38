pub mod chains;
pub mod core;
pub mod graph;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod rag;
pub mod search;

pub use crate::core::config::Settings;
pub use crate::core::errors::PipelineError;
pub use pipeline::{Pipeline, PipelineAnswer};
