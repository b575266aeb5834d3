use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Project;
use crate::infrastructure::database::schema::projects;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProjectModel {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Project> for NewProjectModel {
    fn from(project: &Project) -> Self {
        Self {
            id: Some(project.id()),
            name: project.name().to_string(),
            description: project.description().map(|s| s.to_string()),
            created_at: Some(project.created_at()),
            updated_at: Some(project.updated_at()),
        }
    }
}

impl From<ProjectModel> for Project {
    fn from(model: ProjectModel) -> Self {
        Project::from_parts(
            model.id,
            model.name,
            model.description,
            model.created_at,
            model.updated_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_round_trip_preserves_id() {
        let project = Project::new("docs".to_string(), None);
        let new_model = NewProjectModel::from(&project);

        let stored = ProjectModel {
            id: new_model.id.unwrap(),
            name: new_model.name.clone(),
            description: new_model.description.clone(),
            created_at: new_model.created_at.unwrap(),
            updated_at: new_model.updated_at.unwrap(),
        };

        let restored = Project::from(stored);
        assert_eq!(restored, project);
    }
}
