use async_trait::async_trait;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::{Embedding, EmbeddingRecord, SearchHit};
use crate::domain::value_objects::{SearchFilters, SimilarityMetric};

/// Records sent to storage per insertion round-trip when the caller does
/// not choose otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug)]
pub enum EmbeddingRepositoryError {
    NotFound(Uuid),
    /// Rejected before any network round-trip; the message names the field
    /// and the offending value.
    ValidationError(String),
    /// Unique-constraint violation, surfaced after rollback.
    ConflictError(String),
    DatabaseError(String),
}

impl std::fmt::Display for EmbeddingRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingRepositoryError::NotFound(id) => write!(f, "Embedding not found: {}", id),
            EmbeddingRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            EmbeddingRepositoryError::ConflictError(msg) => write!(f, "Conflict error: {}", msg),
            EmbeddingRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for EmbeddingRepositoryError {}

#[async_trait]
pub trait EmbeddingRepository: Send + Sync {
    /// Batch-inserts embedding records in sub-batches of `batch_size`,
    /// each committed before the next begins. Returns the created ids in
    /// input order. Every vector must have exactly `EMBEDDING_DIM`
    /// components; a violation fails the whole call before any row is
    /// written.
    async fn insert_batch(
        &self,
        records: Vec<EmbeddingRecord>,
        batch_size: usize,
    ) -> Result<Vec<Uuid>, EmbeddingRepositoryError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Embedding>, EmbeddingRepositoryError>;

    async fn count_by_document(
        &self,
        document_id: Uuid,
    ) -> Result<i64, EmbeddingRepositoryError>;

    /// Returns the `limit` nearest embeddings ranked best-first.
    /// `threshold` is a minimum similarity under the chosen metric; rows
    /// below it are excluded inside the ranked query.
    async fn similarity_search(
        &self,
        query_vector: &Vector,
        limit: i64,
        metric: SimilarityMetric,
        threshold: Option<f64>,
    ) -> Result<Vec<SearchHit>, EmbeddingRepositoryError>;

    /// Same ranking semantics as `similarity_search`, with the filters
    /// applied inside the ranked query so a filtered-out majority cannot
    /// starve the result set below `limit`.
    async fn search_with_filters(
        &self,
        query_vector: &Vector,
        filters: &SearchFilters,
        limit: i64,
        metric: SimilarityMetric,
        threshold: Option<f64>,
    ) -> Result<Vec<SearchHit>, EmbeddingRepositoryError>;
}
