// Graph Nodes Module
// Individual node implementations

pub mod generate;
pub mod grade_documents;
pub mod retrieve;
pub mod route;
pub mod web_search;

pub use generate::GenerateNode;
pub use grade_documents::GradeDocumentsNode;
pub use retrieve::RetrieveNode;
pub use route::RouteNode;
pub use web_search::WebSearchNode;
