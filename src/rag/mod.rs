pub mod retriever;
pub mod sqlite;
pub mod store;
pub mod vector_math;

pub use retriever::Retriever;
pub use sqlite::SqliteStore;
pub use store::{Document, ScoredDocument, VectorStore};
