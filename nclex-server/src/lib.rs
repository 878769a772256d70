//! nclex-server: HTTP backend for the NCLEX review hub
//!
//! Users submit exam-preparation reviews, browse and filter them, leave
//! comments, and like entries. Views are counted once per client IP.
//!
//! Layers, leaf first:
//! - [`models`]: validated input types and filters
//! - [`db`]: SQLite pool, schema and repositories
//! - [`http`]: axum router, handlers and error mapping

pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use error::{Error, Result};

use db::{create_pool, init_schema, DbConfig};
use http::{run_server, ServerConfig};

/// Open the database, make sure the schema exists, and serve until shutdown.
pub async fn serve(db: &DbConfig, config: ServerConfig) -> Result<()> {
    let pool = create_pool(db).await?;
    init_schema(&pool).await?;

    tracing::info!(database = %db.path.display(), "database ready");
    run_server(pool, config).await?;
    Ok(())
}
