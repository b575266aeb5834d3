pub mod document_repository;
pub mod embedding_repository;
pub mod project_repository;

pub use document_repository::DocumentRepository;
pub use embedding_repository::EmbeddingRepository;
pub use project_repository::ProjectRepository;
