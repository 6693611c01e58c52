//! Field-level diff engine
//!
//! Compares an optional "before" [`Snapshot`](crate::snapshot::Snapshot)
//! with an "after" snapshot and produces a [`ChangeSet`].
//!
//! ## Entry point
//!
//! ```ignore
//! use auditrail_core::diff::{diff, ChangeContext};
//!
//! let ctx = ChangeContext::now(actor, comment);
//! let change_set = diff(before.as_ref(), &after, &ctx);
//! ```
//!
//! ## Guarantees
//!
//! - **Creation**: with no "before", every non-empty field yields one record
//!   with an absent `old_value`.
//! - **Minimality**: on update, a field yields a record only when its
//!   comparison forms differ.
//! - **Determinism**: records follow the entity's declared field order.

pub mod engine;
pub mod model;

pub use engine::diff;
pub use model::{ChangeContext, ChangeRecord, ChangeSet};
