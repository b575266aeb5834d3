use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::document_repository::{
    DocumentRepository, DocumentRepositoryError,
};
use crate::infrastructure::database::connection::{DbConnection, DbPool};
use crate::infrastructure::database::models::{DocumentModel, NewDocumentModel};
use crate::infrastructure::database::schema::documents;

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_connection(&self) -> Result<DbConnection, DocumentRepositoryError> {
        self.pool.get().map_err(|e| {
            DocumentRepositoryError::DatabaseError(format!(
                "Failed to get database connection: {}",
                e
            ))
        })
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let new_document = NewDocumentModel::from(document);
        let mut conn = self.get_connection()?;

        tokio::task::spawn_blocking(move || {
            diesel::insert_into(documents::table)
                .values(&new_document)
                .execute(&mut conn)
                .map(|_| ())
                .map_err(|e| match e {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                        DocumentRepositoryError::ConflictError(info.message().to_string())
                    }
                    other => DocumentRepositoryError::DatabaseError(format!(
                        "Failed to save document: {}",
                        other
                    )),
                })
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        Ok(())
    }

    async fn find_by_id(
        &self,
        document_id: Uuid,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = self.get_connection()?;

        let result = tokio::task::spawn_blocking(move || {
            documents::table
                .find(document_id)
                .first::<DocumentModel>(&mut conn)
                .optional()
                .map_err(|e| {
                    DocumentRepositoryError::DatabaseError(format!(
                        "Failed to find document: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        match result {
            Some(model) => {
                let document = Document::try_from(model)
                    .map_err(|e| DocumentRepositoryError::DatabaseError(e))?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn find_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = self.get_connection()?;

        let models = tokio::task::spawn_blocking(move || {
            documents::table
                .filter(documents::project_id.eq(project_id))
                .order(documents::file_path.asc())
                .load::<DocumentModel>(&mut conn)
                .map_err(|e| {
                    DocumentRepositoryError::DatabaseError(format!(
                        "Failed to list documents: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            let document = Document::try_from(model)
                .map_err(|e| DocumentRepositoryError::DatabaseError(e))?;
            result.push(document);
        }

        Ok(result)
    }

    async fn delete(&self, document_id: Uuid) -> Result<bool, DocumentRepositoryError> {
        let mut conn = self.get_connection()?;

        let deleted_count = tokio::task::spawn_blocking(move || {
            diesel::delete(documents::table.find(document_id))
                .execute(&mut conn)
                .map_err(|e| {
                    DocumentRepositoryError::DatabaseError(format!(
                        "Failed to delete document: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        Ok(deleted_count > 0)
    }
}
