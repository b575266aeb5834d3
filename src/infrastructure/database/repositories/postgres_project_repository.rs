use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Project;
use crate::domain::repositories::project_repository::{
    ProjectRepository, ProjectRepositoryError,
};
use crate::infrastructure::database::connection::{DbConnection, DbPool};
use crate::infrastructure::database::models::{NewProjectModel, ProjectModel};
use crate::infrastructure::database::schema::projects;

pub struct PostgresProjectRepository {
    pool: DbPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_connection(&self) -> Result<DbConnection, ProjectRepositoryError> {
        self.pool.get().map_err(|e| {
            ProjectRepositoryError::DatabaseError(format!(
                "Failed to get database connection: {}",
                e
            ))
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let new_project = NewProjectModel::from(project);
        let mut conn = self.get_connection()?;

        tokio::task::spawn_blocking(move || {
            diesel::insert_into(projects::table)
                .values(&new_project)
                .execute(&mut conn)
                .map_err(|e| {
                    ProjectRepositoryError::DatabaseError(format!("Failed to save project: {}", e))
                })
        })
        .await
        .map_err(|e| ProjectRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        Ok(())
    }

    async fn find_by_id(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.get_connection()?;

        let result = tokio::task::spawn_blocking(move || {
            projects::table
                .find(project_id)
                .first::<ProjectModel>(&mut conn)
                .optional()
                .map_err(|e| {
                    ProjectRepositoryError::DatabaseError(format!("Failed to find project: {}", e))
                })
        })
        .await
        .map_err(|e| ProjectRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        Ok(result.map(Project::from))
    }

    async fn delete(&self, project_id: Uuid) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.get_connection()?;

        let deleted_count = tokio::task::spawn_blocking(move || {
            diesel::delete(projects::table.find(project_id))
                .execute(&mut conn)
                .map_err(|e| {
                    ProjectRepositoryError::DatabaseError(format!(
                        "Failed to delete project: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(|e| ProjectRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        Ok(deleted_count > 0)
    }
}
