pub mod openai;
pub mod provider;
pub mod types;

pub use openai::OpenAiCompatProvider;
pub use provider::{chat_structured, LlmProvider};
pub use types::{ChatMessage, ChatRequest};
