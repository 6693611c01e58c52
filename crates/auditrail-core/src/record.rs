//! Schema descriptors for tracked records
//!
//! A tracked entity declares its fields once, as a static ordered list of
//! [`FieldDescriptor`]s. The snapshot and diff code walk that list instead of
//! reflecting over the type, so adding an entity means writing one `impl`.
//!
//! ```
//! use auditrail_core::record::{FieldDescriptor, Record};
//! use auditrail_core::value::{FieldKind, FieldValue};
//! use auditrail_core::types::EntityId;
//!
//! struct Probe {
//!     id: EntityId,
//!     label: String,
//! }
//!
//! fn probe_label(p: &Probe) -> FieldValue {
//!     p.label.as_str().into()
//! }
//!
//! const PROBE_FIELDS: &[FieldDescriptor<Probe>] =
//!     &[FieldDescriptor::new("label", FieldKind::Text, probe_label)];
//!
//! impl Record for Probe {
//!     const ENTITY_TYPE: &'static str = "Probe";
//!
//!     fn entity_id(&self) -> EntityId {
//!         self.id.clone()
//!     }
//!
//!     fn fields() -> &'static [FieldDescriptor<Self>] {
//!         PROBE_FIELDS
//!     }
//! }
//! ```

use crate::value::{FieldKind, FieldValue};
use auditrail_core_types::EntityId;

/// One tracked field: its name, declared kind and how to read it
pub struct FieldDescriptor<R> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub extract: fn(&R) -> FieldValue,
}

impl<R> FieldDescriptor<R> {
    pub const fn new(name: &'static str, kind: FieldKind, extract: fn(&R) -> FieldValue) -> Self {
        Self {
            name,
            kind,
            extract,
        }
    }

    /// Read this field from a record
    pub fn read(&self, record: &R) -> FieldValue {
        (self.extract)(record)
    }
}

impl<R> std::fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// An entity whose mutations are audited
///
/// Records own their data; the descriptor table lives for the whole program.
pub trait Record: 'static {
    /// Type name written to `entity_type` on every change record
    const ENTITY_TYPE: &'static str;

    /// Stable identifier of this record
    fn entity_id(&self) -> EntityId;

    /// Tracked fields in declared order
    ///
    /// The order fixes the order of change records within a change set.
    fn fields() -> &'static [FieldDescriptor<Self>]
    where
        Self: Sized;
}
