pub mod connection;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod vector_sql;

pub use connection::{
    DbConnection, DbPool, create_connection_pool, create_connection_pool_from_env,
    run_migrations,
};
pub use repositories::{
    PostgresDocumentRepository, PostgresEmbeddingRepository, PostgresProjectRepository,
};
