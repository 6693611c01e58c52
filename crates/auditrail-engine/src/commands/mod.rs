//! Command orchestration layer.
//!
//! Every mutating command validates its input, then runs the repository
//! write through a [`ChangeCapture`] whose sink is the `change_log` table on
//! the same connection.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` and
//! `tracing::warn!()` for internal details.

#![allow(clippy::result_large_err)]

pub mod change_log;
pub mod feature;
pub mod threshold_set;

use auditrail_core::errors::{AuditError, ExError};
use auditrail_core::monitor::CaptureCounters;
use auditrail_core::types::EntityId;
use auditrail_core::{ChangeCapture, Record};
use auditrail_store::errors::Result;
use auditrail_store::SqliteChangeSink;
use rusqlite::Connection;

static CAPTURE_COUNTERS: CaptureCounters = CaptureCounters::new();

/// Process-wide counters of the capture path
pub fn capture_counters() -> &'static CaptureCounters {
    &CAPTURE_COUNTERS
}

/// Who made a change and why
///
/// An absent `changed_by` is recorded as `"system"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub changed_by: Option<String>,
    pub comment: Option<String>,
}

impl Attribution {
    pub fn new(changed_by: Option<String>, comment: Option<String>) -> Self {
        Self {
            changed_by,
            comment,
        }
    }

    pub fn by(changed_by: impl Into<String>) -> Self {
        Self {
            changed_by: Some(changed_by.into()),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Parse a user-supplied entity id
///
/// # Errors
///
/// `InvalidEntityId` if the text is not a UUID.
pub fn parse_entity_id(text: &str) -> Result<EntityId> {
    EntityId::parse(text).ok_or_else(|| {
        ExError::from(AuditError::InvalidEntityId {
            value: text.to_string(),
        })
    })
}

/// Arguments every audited mutation receives
pub(crate) struct Mutation<I> {
    pub id: EntityId,
    pub input: I,
    pub attribution: Attribution,
}

pub(crate) type Loader<R> = fn(&Connection, &EntityId) -> Result<Option<R>>;

/// Change capture for mutations of `R`, resolving the record by the
/// mutation's id both before and after the write
pub(crate) fn audited<'a, I, T, R>(
    conn: &'a Connection,
    sink: &'a SqliteChangeSink<'a>,
    load: Loader<R>,
) -> ChangeCapture<'a, Mutation<I>, T, R>
where
    I: 'a,
    T: 'a,
    R: Record,
{
    ChangeCapture::new(
        move |m: &Mutation<I>, _: Option<&T>| {
            load(conn, &m.id)?.ok_or_else(|| not_found(R::ENTITY_TYPE, &m.id))
        },
        sink,
    )
    .with_actor(|m: &Mutation<I>| m.attribution.changed_by.clone())
    .with_comment(|m: &Mutation<I>| m.attribution.comment.clone())
    .with_monitor(&CAPTURE_COUNTERS)
}

pub(crate) fn not_found(entity_type: &str, id: &EntityId) -> ExError {
    ExError::from(AuditError::NotFound {
        entity_type: entity_type.to_string(),
        entity_id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_id() {
        let id = EntityId::generate();
        assert_eq!(parse_entity_id(id.as_str()).unwrap(), id);

        let err = parse_entity_id("not-a-uuid").unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_ENTITY_ID");
    }

    #[test]
    fn test_attribution_builders() {
        let attribution = Attribution::by("alice").with_comment("tuning");
        assert_eq!(attribution.changed_by.as_deref(), Some("alice"));
        assert_eq!(attribution.comment.as_deref(), Some("tuning"));
        assert_eq!(Attribution::default().changed_by, None);
    }
}
