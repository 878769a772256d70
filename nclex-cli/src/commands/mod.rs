//! Command implementations for the nclex CLI

pub mod db;
pub mod serve;

pub use db::{run_import, run_init_db, run_stats};
pub use serve::run_serve;
