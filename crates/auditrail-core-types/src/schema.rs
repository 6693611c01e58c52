//! Canonical schema constants for structured logging
//!
//! These constants keep field keys consistent between the logging macros,
//! the change-capture wrapper and test assertions.
//!
//! `tracing` field names are identifiers at the call site, so emitters spell
//! the key out and readers (the test capture layer, assertions) use these
//! constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Audit subjects
pub const FIELD_ENTITY_TYPE: &str = "entity_type";
pub const FIELD_ENTITY_ID: &str = "entity_id";
pub const FIELD_CHANGED_BY: &str = "changed_by";
pub const FIELD_CHANGE_COUNT: &str = "change_count";
pub const FIELD_CAPTURE_STAGE: &str = "stage";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_CAPTURE_SKIPPED: &str = "capture_skipped";
pub const EVENT_CAPTURE_PERSISTED: &str = "capture_persisted";
