pub mod document_model;
pub mod embedding_model;
pub mod project_model;

pub use document_model::*;
pub use embedding_model::*;
pub use project_model::*;
