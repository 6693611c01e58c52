//! auditrail engine - orchestration layer
//!
//! Command handlers that run repository mutations inside change capture and
//! own the boundary logging of each operation.

pub mod commands;

pub use commands::{capture_counters, parse_entity_id, Attribution};
