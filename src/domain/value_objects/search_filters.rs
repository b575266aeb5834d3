use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Equality filters applied inside a ranked query, combined with AND.
/// An empty filter set degrades to plain similarity search.
///
/// Metadata filters compare the stored JSONB value as text, exact match
/// only. Filter order is preserved so that generated statements are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    project_id: Option<Uuid>,
    file_types: Option<Vec<String>>,
    metadata: Vec<(String, String)>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project_id: Uuid) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_file_types(mut self, file_types: Vec<String>) -> Self {
        self.file_types = Some(file_types);
        self
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    pub fn project_id(&self) -> Option<Uuid> {
        self.project_id
    }

    pub fn file_types(&self) -> Option<&[String]> {
        self.file_types.as_deref()
    }

    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    pub fn is_empty(&self) -> bool {
        self.project_id.is_none() && self.file_types.is_none() && self.metadata.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(SearchFilters::new().is_empty());
    }

    #[test]
    fn test_any_filter_marks_non_empty() {
        assert!(!SearchFilters::new().with_project(Uuid::new_v4()).is_empty());
        assert!(
            !SearchFilters::new()
                .with_file_types(vec!["python".to_string()])
                .is_empty()
        );
        assert!(!SearchFilters::new().with_metadata("lang", "py").is_empty());
    }

    #[test]
    fn test_metadata_order_is_preserved() {
        let filters = SearchFilters::new()
            .with_metadata("lang", "py")
            .with_metadata("section", "intro");

        assert_eq!(
            filters.metadata(),
            &[
                ("lang".to_string(), "py".to_string()),
                ("section".to_string(), "intro".to_string()),
            ]
        );
    }
}
