pub mod document;
pub mod embedding;
pub mod project;
pub mod search_hit;

pub use document::Document;
pub use embedding::{EMBEDDING_DIM, Embedding, EmbeddingRecord};
pub use project::Project;
pub use search_hit::SearchHit;
