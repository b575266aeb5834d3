use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ContentHash;

/// A single ingested file. `(project_id, file_path)` is unique per project;
/// deleting a document cascades to its embeddings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    project_id: Uuid,
    file_path: String,
    content: Option<String>,
    file_type: Option<String>,
    size_bytes: Option<i64>,
    hash: Option<ContentHash>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    /// Size and hash are derived from the content when it is supplied.
    pub fn new(
        project_id: Uuid,
        file_path: String,
        content: Option<String>,
        file_type: Option<String>,
    ) -> Self {
        let size_bytes = content.as_ref().map(|c| c.len() as i64);
        let hash = content
            .as_ref()
            .map(|c| ContentHash::from_bytes(c.as_bytes()));
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            project_id,
            file_path,
            content,
            file_type,
            size_bytes,
            hash,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        project_id: Uuid,
        file_path: String,
        content: Option<String>,
        file_type: Option<String>,
        size_bytes: Option<i64>,
        hash: Option<ContentHash>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            file_path,
            content,
            file_type,
            size_bytes,
            hash,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    pub fn size_bytes(&self) -> Option<i64> {
        self.size_bytes
    }

    pub fn hash(&self) -> Option<&ContentHash> {
        self.hash.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
