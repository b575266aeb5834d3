use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager},
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenv::dotenv;
use std::env;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug)]
pub enum DatabaseError {
    ConnectionError(String),
    PoolError(String),
    ConfigurationError(String),
    MigrationError(String),
}

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

impl std::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            DatabaseError::PoolError(msg) => write!(f, "Pool error: {}", msg),
            DatabaseError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            DatabaseError::MigrationError(msg) => write!(f, "Migration error: {}", msg),
        }
    }
}

impl std::error::Error for DatabaseError {}

/// Builds the shared connection pool. One pooled connection is held per
/// logical storage operation; concurrency is bounded by `max_size`.
pub fn create_connection_pool(
    database_url: &str,
    max_size: u32,
) -> Result<DbPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    r2d2::Pool::builder()
        .max_size(max_size)
        .min_idle(Some(1))
        .build(manager)
        .map_err(|e| DatabaseError::PoolError(e.to_string()))
}

/// Reads `DATABASE_URL` and optional `DATABASE_POOL_SIZE` from the
/// environment (including a `.env` file when present) and builds the pool.
pub fn create_connection_pool_from_env() -> Result<DbPool, DatabaseError> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| DatabaseError::ConfigurationError("DATABASE_URL not set".to_string()))?;

    let max_size = match env::var("DATABASE_POOL_SIZE") {
        Ok(value) => value.parse::<u32>().map_err(|_| {
            DatabaseError::ConfigurationError(format!(
                "DATABASE_POOL_SIZE must be a positive integer, got '{}'",
                value
            ))
        })?,
        Err(_) => DEFAULT_POOL_SIZE,
    };

    create_connection_pool(&database_url, max_size)
}

/// Applies the embedded schema migration, including the pgvector extension
/// and the IVFFlat index. Rebuilding that index later is an out-of-band
/// operation, never part of a query path.
pub fn run_migrations(conn: &mut PgConnection) -> Result<(), DatabaseError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    Ok(())
}
