use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vector width of the embedding column. Matches the embedding model's
/// output size; fixed at schema-creation time, not configurable per row.
pub const EMBEDDING_DIM: usize = 1536;

/// A stored vector representation of one document chunk.
/// `(document_id, chunk_index)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    id: Uuid,
    document_id: Uuid,
    chunk_index: i32,
    chunk_text: String,
    embedding: Vector,
    metadata: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Embedding {
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        document_id: Uuid,
        chunk_index: i32,
        chunk_text: String,
        embedding: Vector,
        metadata: Option<serde_json::Value>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            chunk_index,
            chunk_text,
            embedding,
            metadata,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn chunk_text(&self) -> &str {
        &self.chunk_text
    }

    pub fn embedding(&self) -> &Vector {
        &self.embedding
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn dimension(&self) -> usize {
        self.embedding.as_slice().len()
    }
}

/// Insertion payload for one chunk, as accepted by the batch insert
/// operation. Ids are assigned at insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    pub document_id: Uuid,
    pub chunk_index: i32,
    pub chunk_text: String,
    pub embedding: Vector,
    pub metadata: Option<serde_json::Value>,
}

impl EmbeddingRecord {
    pub fn new(
        document_id: Uuid,
        chunk_index: i32,
        chunk_text: String,
        embedding: Vec<f32>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            document_id,
            chunk_index,
            chunk_text,
            embedding: Vector::from(embedding),
            metadata,
        }
    }

    pub fn dimension(&self) -> usize {
        self.embedding.as_slice().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_dimension() {
        let record = EmbeddingRecord::new(
            Uuid::new_v4(),
            0,
            "chunk".to_string(),
            vec![0.0; EMBEDDING_DIM],
            None,
        );

        assert_eq!(record.dimension(), EMBEDDING_DIM);
    }

    #[test]
    fn test_record_keeps_metadata() {
        let metadata = serde_json::json!({"lang": "py"});
        let record = EmbeddingRecord::new(
            Uuid::new_v4(),
            3,
            "def main():".to_string(),
            vec![0.5; EMBEDDING_DIM],
            Some(metadata.clone()),
        );

        assert_eq!(record.metadata, Some(metadata));
        assert_eq!(record.chunk_index, 3);
    }

    #[test]
    fn test_entity_round_trip_fields() {
        let id = Uuid::new_v4();
        let document_id = Uuid::new_v4();
        let now = Utc::now();
        let embedding = Embedding::from_parts(
            id,
            document_id,
            7,
            "some text".to_string(),
            Vector::from(vec![1.0, 0.0, 0.0]),
            Some(serde_json::json!({"section": "intro"})),
            now,
            now,
        );

        assert_eq!(embedding.id(), id);
        assert_eq!(embedding.document_id(), document_id);
        assert_eq!(embedding.chunk_index(), 7);
        assert_eq!(embedding.dimension(), 3);
    }
}
