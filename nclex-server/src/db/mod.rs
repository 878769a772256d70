//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Storage location injected through `DbConfig`
//! - Rely on DB constraints; dedup via insert-if-absent, not check-then-insert
//! - Transactions only for multi-step operations

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, DbConfig};
pub use repos::*;
pub use schema::init_schema;
