//! Storage layer for a context ingestion platform.
//!
//! Projects own documents, documents own fixed-dimension embedding chunks
//! persisted in PostgreSQL with the pgvector extension. The crate provides
//! schema provisioning, batched embedding insertion, and ranked similarity
//! search (plain and filtered). Ranking happens inside the database via the
//! pgvector distance operators; the IVFFlat index is built for cosine
//! distance, so L2 queries are served without index support.

pub mod domain;
pub mod infrastructure;

pub use domain::entities::{
    Document, EMBEDDING_DIM, Embedding, EmbeddingRecord, Project, SearchHit,
};
pub use domain::repositories::{DocumentRepository, EmbeddingRepository, ProjectRepository};
pub use domain::value_objects::{ContentHash, SearchFilters, SimilarityMetric};
pub use infrastructure::database::{
    DbPool, create_connection_pool, create_connection_pool_from_env, run_migrations,
};
