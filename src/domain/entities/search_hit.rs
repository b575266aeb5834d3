use serde::Serialize;
use uuid::Uuid;

/// One ranked row returned by similarity search, annotated with the raw
/// operator distance and the derived similarity score. Rows arrive
/// best-first (ascending distance).
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: Uuid,
    pub document_id: Uuid,
    pub project_id: Uuid,
    pub file_path: String,
    pub file_type: Option<String>,
    pub chunk_index: i32,
    pub chunk_text: String,
    pub metadata: Option<serde_json::Value>,
    pub similarity: f64,
    pub distance: f64,
}
