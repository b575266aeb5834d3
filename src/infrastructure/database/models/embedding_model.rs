use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Embedding;
use crate::infrastructure::database::schema::embeddings;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = embeddings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmbeddingModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub chunk_index: i32,
    pub chunk_text: String,
    pub embedding: Vector,
    pub embedding_metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = embeddings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEmbeddingModel {
    pub id: Option<Uuid>,
    pub document_id: Uuid,
    pub chunk_index: i32,
    pub chunk_text: String,
    pub embedding: Vector,
    pub embedding_metadata: Option<serde_json::Value>,
}

impl From<EmbeddingModel> for Embedding {
    fn from(model: EmbeddingModel) -> Self {
        Embedding::from_parts(
            model.id,
            model.document_id,
            model.chunk_index,
            model.chunk_text,
            model.embedding,
            model.embedding_metadata,
            model.created_at,
            model.updated_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_to_entity_preserves_metadata() {
        let metadata = serde_json::json!({"lang": "py", "tokens": 150});
        let id = Uuid::new_v4();
        let now = Utc::now();

        let model = EmbeddingModel {
            id,
            document_id: Uuid::new_v4(),
            chunk_index: 2,
            chunk_text: "import os".to_string(),
            embedding: Vector::from(vec![0.0, 1.0]),
            embedding_metadata: Some(metadata.clone()),
            created_at: now,
            updated_at: now,
        };

        let entity = Embedding::from(model);
        assert_eq!(entity.id(), id);
        assert_eq!(entity.metadata(), Some(&metadata));
        assert_eq!(entity.chunk_index(), 2);
    }
}
