use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::value_objects::ContentHash;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub project_id: Uuid,
    pub file_path: String,
    pub content: Option<String>,
    pub file_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Option<Uuid>,
    pub project_id: Uuid,
    pub file_path: String,
    pub content: Option<String>,
    pub file_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub hash: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Document> for NewDocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: Some(document.id()),
            project_id: document.project_id(),
            file_path: document.file_path().to_string(),
            content: document.content().map(|s| s.to_string()),
            file_type: document.file_type().map(|s| s.to_string()),
            size_bytes: document.size_bytes(),
            hash: document.hash().map(|h| h.as_str().to_string()),
            created_at: Some(document.created_at()),
            updated_at: Some(document.updated_at()),
        }
    }
}

impl TryFrom<DocumentModel> for Document {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let hash = match model.hash {
            Some(hash_str) => Some(
                ContentHash::parse(hash_str).map_err(|e| format!("Invalid content hash: {}", e))?,
            ),
            None => None,
        };

        Ok(Document::from_parts(
            model.id,
            model.project_id,
            model.file_path,
            model.content,
            model.file_type,
            model.size_bytes,
            hash,
            model.created_at,
            model.updated_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trip() {
        let document = Document::new(
            Uuid::new_v4(),
            "/src/lib.rs".to_string(),
            Some("pub fn main() {}".to_string()),
            Some("rust".to_string()),
        );

        let new_model = NewDocumentModel::from(&document);
        let stored = DocumentModel {
            id: new_model.id.unwrap(),
            project_id: new_model.project_id,
            file_path: new_model.file_path.clone(),
            content: new_model.content.clone(),
            file_type: new_model.file_type.clone(),
            size_bytes: new_model.size_bytes,
            hash: new_model.hash.clone(),
            created_at: new_model.created_at.unwrap(),
            updated_at: new_model.updated_at.unwrap(),
        };

        let restored = Document::try_from(stored).unwrap();
        assert_eq!(restored, document);
    }

    #[test]
    fn test_invalid_stored_hash_is_rejected() {
        let stored = DocumentModel {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            file_path: "/a".to_string(),
            content: None,
            file_type: None,
            size_bytes: None,
            hash: Some("not-a-digest".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(Document::try_from(stored).is_err());
    }
}
