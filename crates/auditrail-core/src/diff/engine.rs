//! Change set computation.
//!
//! The entry point is [`diff`], which walks the "after" snapshot (creation)
//! or the "before" snapshot (update) in declared field order.

use crate::diff::model::{ChangeContext, ChangeRecord, ChangeSet};
use crate::normalize::{normalize_for_compare, normalize_for_store};
use crate::snapshot::Snapshot;
use crate::value::FieldValue;
use serde_json::Value;

/// Compute the change set between two snapshots of one entity
///
/// - `old == None`: creation. One record per non-empty field of `new`, with
///   `old_value` absent.
/// - `old == Some(_)`: update. One record per field of `old` whose comparison
///   form differs from the same field in `new`. A field missing from `new`
///   compares as null.
///
/// Stored values are always the storage forms of the raw values, never the
/// comparison forms.
pub fn diff(old: Option<&Snapshot>, new: &Snapshot, ctx: &ChangeContext) -> ChangeSet {
    let records = match old {
        None => creation_records(new, ctx),
        Some(old) => {
            if old.entity_type() != new.entity_type() || old.entity_id() != new.entity_id() {
                tracing::debug!(
                    old_entity_type = old.entity_type(),
                    new_entity_type = new.entity_type(),
                    old_entity_id = %old.entity_id(),
                    new_entity_id = %new.entity_id(),
                    "Diffing snapshots of different entities; attributing to the old one"
                );
            }
            update_records(old, new, ctx)
        }
    };

    ChangeSet::new(ctx.clone(), records)
}

fn creation_records(new: &Snapshot, ctx: &ChangeContext) -> Vec<ChangeRecord> {
    new.iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| record(new, field, None, stored(value), ctx))
        .collect()
}

fn update_records(old: &Snapshot, new: &Snapshot, ctx: &ChangeContext) -> Vec<ChangeRecord> {
    let null = FieldValue::Null;
    old.iter()
        .filter_map(|(field, old_value)| {
            let new_value = new.get(field).unwrap_or(&null);
            if normalize_for_compare(old_value) == normalize_for_compare(new_value) {
                return None;
            }
            Some(record(old, field, stored(old_value), stored(new_value), ctx))
        })
        .collect()
}

fn stored(value: &FieldValue) -> Option<Value> {
    match normalize_for_store(value) {
        Value::Null => None,
        other => Some(other),
    }
}

fn record(
    subject: &Snapshot,
    field: &str,
    old_value: Option<Value>,
    new_value: Option<Value>,
    ctx: &ChangeContext,
) -> ChangeRecord {
    ChangeRecord {
        entity_type: subject.entity_type().to_string(),
        entity_id: subject.entity_id().clone(),
        field_name: field.to_string(),
        old_value,
        new_value,
        changed_by: ctx.changed_by.clone(),
        changed_at: ctx.changed_at,
        comment: ctx.comment.clone(),
    }
}
