//! Core types shared across auditrail crates
//!
//! This crate provides the small vocabulary used by both the audit core
//! and the persistence layer:
//!
//! - **Identity types**: EntityId for tracked records
//! - **Attribution types**: Actor, with the `"system"` fallback
//! - **Schema constants**: Canonical log field keys and event names

pub mod attribution;
pub mod identity;
pub mod schema;

pub use attribution::{Actor, SYSTEM_ACTOR};
pub use identity::EntityId;
