//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits. The database
//! location comes from `DbConfig`, resolved once at startup.

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "nclex_reviews.db";

/// Storage location and pool sizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Create a SQLite connection pool.
///
/// Every connection has foreign keys enforced, so deleting a review
/// cascades to its comments and view logs.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::new("nclex_reviews.db")).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    tracing::debug!(path = %config.path.display(), "opening database");

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}
