//! Change record types.

use auditrail_core_types::{Actor, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribution shared by every record of one change set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeContext {
    pub changed_by: Actor,
    pub changed_at: DateTime<Utc>,
    pub comment: Option<String>,
}

impl ChangeContext {
    /// Context stamped with the current time
    pub fn now(changed_by: Actor, comment: Option<String>) -> Self {
        Self::at(changed_by, Utc::now(), comment)
    }

    /// Context stamped with an explicit time
    pub fn at(changed_by: Actor, changed_at: DateTime<Utc>, comment: Option<String>) -> Self {
        Self {
            changed_by,
            changed_at,
            comment,
        }
    }
}

/// One field-level audit entry
///
/// `old_value`/`new_value` hold storage-normalized JSON; `None` means the
/// value was absent (creation) or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub entity_type: String,
    pub entity_id: EntityId,
    pub field_name: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub changed_by: Actor,
    pub changed_at: DateTime<Utc>,
    pub comment: Option<String>,
}

/// All change records produced from one before/after comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    context: ChangeContext,
    records: Vec<ChangeRecord>,
}

impl ChangeSet {
    pub(crate) fn new(context: ChangeContext, records: Vec<ChangeRecord>) -> Self {
        Self { context, records }
    }

    pub fn context(&self) -> &ChangeContext {
        &self.context
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
        self.records.iter()
    }

    /// The record for `field_name`, if that field changed
    pub fn get(&self, field_name: &str) -> Option<&ChangeRecord> {
        self.records.iter().find(|r| r.field_name == field_name)
    }

    /// Names of changed fields in order
    pub fn field_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.field_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Type of the audited entity, if the set is non-empty
    pub fn entity_type(&self) -> Option<&str> {
        self.records.first().map(|r| r.entity_type.as_str())
    }

    /// ID of the audited entity, if the set is non-empty
    pub fn entity_id(&self) -> Option<&EntityId> {
        self.records.first().map(|r| &r.entity_id)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
