//! auditrail store - SQLite persistence for setpoints and their change log
//!
//! Provides:
//! - Connection helpers
//! - Embedded, checksummed schema migrations
//! - Repository for features and threshold sets
//! - `SqliteChangeSink` and change-log queries

pub mod change_log;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use change_log::{ChangeLogQuery, SqliteChangeSink, StoredChange};
pub use errors::Result;
pub use repo::SqliteRepo;
