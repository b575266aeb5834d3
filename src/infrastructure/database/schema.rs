diesel::table! {
    use diesel::sql_types::*;

    projects (id) {
        id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    documents (id) {
        id -> Uuid,
        project_id -> Uuid,
        file_path -> Text,
        content -> Nullable<Text>,
        file_type -> Nullable<Text>,
        size_bytes -> Nullable<Int8>,
        hash -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    embeddings (id) {
        id -> Uuid,
        document_id -> Uuid,
        chunk_index -> Int4,
        chunk_text -> Text,
        embedding -> Vector,
        embedding_metadata -> Nullable<Jsonb>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(documents -> projects (project_id));
diesel::joinable!(embeddings -> documents (document_id));

diesel::allow_tables_to_appear_in_same_query!(projects, documents, embeddings);
