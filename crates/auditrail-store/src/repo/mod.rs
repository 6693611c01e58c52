//! Repository layer for persisting setpoint models to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
