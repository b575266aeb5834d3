use std::time::Instant;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::{EMBEDDING_DIM, Embedding, EmbeddingRecord, SearchHit};
use crate::domain::repositories::embedding_repository::{
    EmbeddingRepository, EmbeddingRepositoryError,
};
use crate::domain::value_objects::{SearchFilters, SimilarityMetric};
use crate::infrastructure::database::connection::{DbConnection, DbPool};
use crate::infrastructure::database::models::{EmbeddingModel, NewEmbeddingModel};
use crate::infrastructure::database::schema::embeddings;
use crate::infrastructure::database::vector_sql::{self, RankedSearchRow};

/// Soft latency target for ranked queries. Exceeding it logs a warning;
/// the result is still returned.
const SEARCH_LATENCY_TARGET_MS: f64 = 100.0;

pub struct PostgresEmbeddingRepository {
    pool: DbPool,
}

impl PostgresEmbeddingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_connection(&self) -> Result<DbConnection, EmbeddingRepositoryError> {
        self.pool.get().map_err(|e| {
            EmbeddingRepositoryError::DatabaseError(format!(
                "Failed to get database connection: {}",
                e
            ))
        })
    }

    async fn ranked_search(
        &self,
        query_vector: &Vector,
        filters: &SearchFilters,
        limit: i64,
        metric: SimilarityMetric,
        threshold: Option<f64>,
        op_label: &'static str,
    ) -> Result<Vec<SearchHit>, EmbeddingRepositoryError> {
        let dimension = query_vector.as_slice().len();
        if dimension != EMBEDDING_DIM {
            return Err(EmbeddingRepositoryError::ValidationError(format!(
                "query vector: expected {} dimensions, got {}",
                EMBEDDING_DIM, dimension
            )));
        }
        if limit < 1 {
            return Err(EmbeddingRepositoryError::ValidationError(format!(
                "limit must be at least 1, got {}",
                limit
            )));
        }

        let bound = threshold.and_then(|t| metric.distance_bound(t));
        let query_vector = query_vector.clone();
        let filters = filters.clone();

        let started = Instant::now();
        let mut conn = self.get_connection()?;

        let rows = tokio::task::spawn_blocking(move || {
            let query =
                vector_sql::ranked_search_query(query_vector, metric, &filters, bound, limit);
            query.load::<RankedSearchRow>(&mut conn).map_err(|e| {
                EmbeddingRepositoryError::DatabaseError(format!("{} failed: {}", op_label, e))
            })
        })
        .await
        .map_err(|e| EmbeddingRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            "{} ({}) completed in {:.1}ms, returned {} results",
            op_label,
            metric,
            elapsed_ms,
            rows.len()
        );
        if elapsed_ms > SEARCH_LATENCY_TARGET_MS {
            tracing::warn!(
                "{} took {:.1}ms, exceeding {:.0}ms performance target",
                op_label,
                elapsed_ms,
                SEARCH_LATENCY_TARGET_MS
            );
        }

        let hits = rows
            .into_iter()
            .map(|row| SearchHit {
                id: row.id,
                document_id: row.document_id,
                project_id: row.project_id,
                file_path: row.file_path,
                file_type: row.file_type,
                chunk_index: row.chunk_index,
                chunk_text: row.chunk_text,
                metadata: row.embedding_metadata,
                similarity: metric.similarity(row.distance),
                distance: row.distance,
            })
            .collect();

        Ok(hits)
    }
}

/// Validates every record ahead of any database round-trip and pairs each
/// with a freshly assigned id, preserving input order.
fn prepare_batch(
    records: &[EmbeddingRecord],
) -> Result<(Vec<NewEmbeddingModel>, Vec<Uuid>), EmbeddingRepositoryError> {
    let mut models = Vec::with_capacity(records.len());
    let mut ids = Vec::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        let dimension = record.dimension();
        if dimension != EMBEDDING_DIM {
            return Err(EmbeddingRepositoryError::ValidationError(format!(
                "embedding at position {}: expected {} dimensions, got {}",
                position, EMBEDDING_DIM, dimension
            )));
        }

        let id = Uuid::new_v4();
        ids.push(id);
        models.push(NewEmbeddingModel {
            id: Some(id),
            document_id: record.document_id,
            chunk_index: record.chunk_index,
            chunk_text: record.chunk_text.clone(),
            embedding: record.embedding.clone(),
            embedding_metadata: record.metadata.clone(),
        });
    }

    Ok((models, ids))
}

fn map_insert_error(error: DieselError) -> EmbeddingRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            EmbeddingRepositoryError::ConflictError(info.message().to_string())
        }
        other => EmbeddingRepositoryError::DatabaseError(format!(
            "Failed to insert embeddings: {}",
            other
        )),
    }
}

#[async_trait]
impl EmbeddingRepository for PostgresEmbeddingRepository {
    async fn insert_batch(
        &self,
        records: Vec<EmbeddingRecord>,
        batch_size: usize,
    ) -> Result<Vec<Uuid>, EmbeddingRepositoryError> {
        if batch_size == 0 {
            return Err(EmbeddingRepositoryError::ValidationError(
                "batch_size must be at least 1".to_string(),
            ));
        }

        let (models, ids) = prepare_batch(&records)?;
        if models.is_empty() {
            return Ok(ids);
        }

        let total = models.len();
        let started = Instant::now();
        let mut conn = self.get_connection()?;

        tokio::task::spawn_blocking(move || {
            // Sub-batches commit progressively, in submission order, so a
            // failure rolls back only the sub-batch that raised it.
            for chunk in models.chunks(batch_size) {
                conn.transaction::<_, DieselError, _>(|conn| {
                    diesel::insert_into(embeddings::table)
                        .values(chunk)
                        .execute(conn)
                        .map(|_| ())
                })
                .map_err(map_insert_error)?;
            }
            Ok::<(), EmbeddingRepositoryError>(())
        })
        .await
        .map_err(|e| EmbeddingRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        let elapsed = started.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            total as f64 / elapsed
        } else {
            f64::INFINITY
        };
        tracing::info!(
            "inserted {} embeddings in {:.2}s ({:.0} embeddings/s)",
            total,
            elapsed,
            rate
        );

        Ok(ids)
    }

    async fn find_by_id(
        &self,
        embedding_id: Uuid,
    ) -> Result<Option<Embedding>, EmbeddingRepositoryError> {
        let mut conn = self.get_connection()?;

        let result = tokio::task::spawn_blocking(move || {
            embeddings::table
                .find(embedding_id)
                .first::<EmbeddingModel>(&mut conn)
                .optional()
                .map_err(|e| {
                    EmbeddingRepositoryError::DatabaseError(format!(
                        "Failed to find embedding: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(|e| EmbeddingRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        Ok(result.map(Embedding::from))
    }

    async fn count_by_document(
        &self,
        document_id: Uuid,
    ) -> Result<i64, EmbeddingRepositoryError> {
        let mut conn = self.get_connection()?;

        tokio::task::spawn_blocking(move || {
            embeddings::table
                .filter(embeddings::document_id.eq(document_id))
                .count()
                .get_result(&mut conn)
                .map_err(|e| {
                    EmbeddingRepositoryError::DatabaseError(format!(
                        "Failed to count embeddings: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(|e| EmbeddingRepositoryError::DatabaseError(format!("Task join error: {}", e)))?
    }

    async fn similarity_search(
        &self,
        query_vector: &Vector,
        limit: i64,
        metric: SimilarityMetric,
        threshold: Option<f64>,
    ) -> Result<Vec<SearchHit>, EmbeddingRepositoryError> {
        self.ranked_search(
            query_vector,
            &SearchFilters::new(),
            limit,
            metric,
            threshold,
            "similarity search",
        )
        .await
    }

    async fn search_with_filters(
        &self,
        query_vector: &Vector,
        filters: &SearchFilters,
        limit: i64,
        metric: SimilarityMetric,
        threshold: Option<f64>,
    ) -> Result<Vec<SearchHit>, EmbeddingRepositoryError> {
        self.ranked_search(
            query_vector,
            filters,
            limit,
            metric,
            threshold,
            "filtered similarity search",
        )
        .await
    }
}
