use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Document;

#[derive(Debug)]
pub enum DocumentRepositoryError {
    NotFound(Uuid),
    /// A document with the same `(project_id, file_path)` already exists.
    ConflictError(String),
    DatabaseError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::NotFound(id) => write!(f, "Document not found: {}", id),
            DocumentRepositoryError::ConflictError(msg) => write!(f, "Conflict error: {}", msg),
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError>;

    async fn find_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<Document>, DocumentRepositoryError>;

    /// Deletes the document; its embeddings cascade in storage.
    async fn delete(&self, id: Uuid) -> Result<bool, DocumentRepositoryError>;
}
