//! Raw-statement layer for the ranked vector queries.
//!
//! The pgvector distance operators have no counterpart in the portable
//! query DSL, so the ranked statements are rendered here as parameterized
//! SQL and bound in a fixed order: query vector first, then filters in
//! declaration order, then the distance bound, then the limit. Plain and
//! filtered search share this one builder; an empty filter set renders the
//! plain statement.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Array, BigInt, Double, Integer, Jsonb, Nullable, Text, Uuid as SqlUuid};
use pgvector::Vector;
use pgvector::sql_types::Vector as VectorSql;
use uuid::Uuid;

use crate::domain::value_objects::{SearchFilters, SimilarityMetric};

/// Row shape produced by the ranked statement. `distance` is the raw
/// operator value; similarity is derived by the caller.
#[derive(Debug, QueryableByName)]
pub struct RankedSearchRow {
    #[diesel(sql_type = SqlUuid)]
    pub id: Uuid,
    #[diesel(sql_type = SqlUuid)]
    pub document_id: Uuid,
    #[diesel(sql_type = SqlUuid)]
    pub project_id: Uuid,
    #[diesel(sql_type = Text)]
    pub file_path: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub file_type: Option<String>,
    #[diesel(sql_type = Integer)]
    pub chunk_index: i32,
    #[diesel(sql_type = Text)]
    pub chunk_text: String,
    #[diesel(sql_type = Nullable<Jsonb>)]
    pub embedding_metadata: Option<serde_json::Value>,
    #[diesel(sql_type = Double)]
    pub distance: f64,
}

pub(crate) fn render_ranked_sql(
    metric: SimilarityMetric,
    filters: &SearchFilters,
    with_bound: bool,
) -> String {
    let op = metric.operator();
    let mut sql = format!(
        "SELECT e.id, e.document_id, d.project_id, d.file_path, d.file_type, \
         e.chunk_index, e.chunk_text, e.embedding_metadata, \
         e.embedding {} $1 AS distance \
         FROM embeddings e \
         INNER JOIN documents d ON e.document_id = d.id",
        op
    );

    let mut next_param = 2;
    let mut clauses: Vec<String> = Vec::new();

    if filters.project_id().is_some() {
        clauses.push(format!("d.project_id = ${}", next_param));
        next_param += 1;
    }
    if filters.file_types().is_some() {
        clauses.push(format!("d.file_type = ANY(${})", next_param));
        next_param += 1;
    }
    for _ in filters.metadata() {
        clauses.push(format!(
            "e.embedding_metadata ->> ${} = ${}",
            next_param,
            next_param + 1
        ));
        next_param += 2;
    }
    if with_bound {
        clauses.push(format!("(e.embedding {} $1) <= ${}", op, next_param));
        next_param += 1;
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    sql.push_str(&format!(" ORDER BY distance ASC LIMIT ${}", next_param));
    sql
}

/// Renders and binds the ranked statement. Filtering happens inside this
/// statement, ahead of the LIMIT, never as a re-rank of unfiltered top-K.
pub fn ranked_search_query(
    query_vector: Vector,
    metric: SimilarityMetric,
    filters: &SearchFilters,
    distance_bound: Option<f64>,
    limit: i64,
) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    let sql = render_ranked_sql(metric, filters, distance_bound.is_some());
    let mut query = diesel::sql_query(sql).into_boxed();

    query = query.bind::<VectorSql, _>(query_vector);
    if let Some(project_id) = filters.project_id() {
        query = query.bind::<SqlUuid, _>(project_id);
    }
    if let Some(file_types) = filters.file_types() {
        query = query.bind::<Array<Text>, _>(file_types.to_vec());
    }
    for (key, value) in filters.metadata() {
        query = query
            .bind::<Text, _>(key.clone())
            .bind::<Text, _>(value.clone());
    }
    if let Some(bound) = distance_bound {
        query = query.bind::<Double, _>(bound);
    }
    query.bind::<BigInt, _>(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cosine_statement() {
        let sql = render_ranked_sql(SimilarityMetric::Cosine, &SearchFilters::new(), false);

        assert_eq!(
            sql,
            "SELECT e.id, e.document_id, d.project_id, d.file_path, d.file_type, \
             e.chunk_index, e.chunk_text, e.embedding_metadata, \
             e.embedding <=> $1 AS distance \
             FROM embeddings e \
             INNER JOIN documents d ON e.document_id = d.id \
             ORDER BY distance ASC LIMIT $2"
        );
    }

    #[test]
    fn test_empty_filters_render_no_where_clause() {
        let sql = render_ranked_sql(SimilarityMetric::Cosine, &SearchFilters::new(), false);
        assert!(!sql.contains(" WHERE "));
    }

    #[test]
    fn test_l2_uses_euclidean_operator() {
        let sql = render_ranked_sql(SimilarityMetric::L2, &SearchFilters::new(), false);
        assert!(sql.contains("e.embedding <-> $1 AS distance"));
        assert!(!sql.contains("<=>"));
    }

    #[test]
    fn test_distance_bound_repeats_operator_expression() {
        let sql = render_ranked_sql(SimilarityMetric::Cosine, &SearchFilters::new(), true);
        assert!(sql.contains("WHERE (e.embedding <=> $1) <= $2"));
        assert!(sql.ends_with("ORDER BY distance ASC LIMIT $3"));
    }

    #[test]
    fn test_project_filter_placement() {
        let filters = SearchFilters::new().with_project(Uuid::new_v4());
        let sql = render_ranked_sql(SimilarityMetric::Cosine, &filters, false);

        assert!(sql.contains("WHERE d.project_id = $2"));
        assert!(sql.ends_with("LIMIT $3"));
    }

    #[test]
    fn test_file_type_filter_uses_any() {
        let filters = SearchFilters::new().with_file_types(vec!["python".to_string()]);
        let sql = render_ranked_sql(SimilarityMetric::Cosine, &filters, false);

        assert!(sql.contains("WHERE d.file_type = ANY($2)"));
    }

    #[test]
    fn test_metadata_filters_bind_key_and_value() {
        let filters = SearchFilters::new()
            .with_metadata("lang", "py")
            .with_metadata("section", "intro");
        let sql = render_ranked_sql(SimilarityMetric::Cosine, &filters, false);

        assert!(sql.contains("e.embedding_metadata ->> $2 = $3"));
        assert!(sql.contains("e.embedding_metadata ->> $4 = $5"));
        assert!(sql.ends_with("LIMIT $6"));
    }

    #[test]
    fn test_all_filters_combined_with_and() {
        let filters = SearchFilters::new()
            .with_project(Uuid::new_v4())
            .with_file_types(vec!["python".to_string(), "rust".to_string()])
            .with_metadata("lang", "py");
        let sql = render_ranked_sql(SimilarityMetric::L2, &filters, true);

        assert!(sql.contains(
            "WHERE d.project_id = $2 \
             AND d.file_type = ANY($3) \
             AND e.embedding_metadata ->> $4 = $5 \
             AND (e.embedding <-> $1) <= $6"
        ));
        assert!(sql.ends_with("ORDER BY distance ASC LIMIT $7"));
    }
}
