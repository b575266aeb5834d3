pub mod postgres_document_repository;
pub mod postgres_embedding_repository;
pub mod postgres_project_repository;

pub use postgres_document_repository::PostgresDocumentRepository;
pub use postgres_embedding_repository::PostgresEmbeddingRepository;
pub use postgres_project_repository::PostgresProjectRepository;
