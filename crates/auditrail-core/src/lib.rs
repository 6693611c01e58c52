//! auditrail core - generic entity change tracking
//!
//! This crate computes and records field-level audit trails for arbitrary
//! entity types:
//! - Record schema descriptors (explicit, static field tables)
//! - Value normalization for comparison and for storage
//! - Snapshots and the field-level diff engine
//! - The change capture wrapper around mutation operations
//! - Change sink and capture monitor seams
//! - The tracked setpoint entities and their validation rules

pub mod capture;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod monitor;
pub mod normalize;
pub mod record;
pub mod rules;
pub mod sink;
pub mod snapshot;
pub mod value;

pub use auditrail_core_types as types;

// Re-export commonly used types
pub use capture::{capture_changes, ChangeCapture};
pub use diff::{diff, ChangeContext, ChangeRecord, ChangeSet};
pub use errors::{AuditError, ExError, ExErrorKind, Result};
pub use model::{Feature, FeatureInput, ThresholdSet, ThresholdSetInput};
pub use monitor::{CaptureCounters, CaptureMonitor, CaptureStage, NoopMonitor};
pub use record::{FieldDescriptor, Record};
pub use sink::{ChangeSink, MemorySink};
pub use snapshot::Snapshot;
pub use value::{FieldKind, FieldValue};
