//! Error types for nclex-server entry points

use thiserror::Error;

use crate::db::DbError;
use crate::http::ServerError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from opening storage or running the server
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Repository(#[from] DbError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}
