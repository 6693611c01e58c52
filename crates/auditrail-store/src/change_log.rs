//! The `change_log` table: batch writer and queries
//!
//! One row per changed field. `old_value` and `new_value` hold the stored
//! JSON form of the value, or NULL when the value was absent.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, from_serde_json, Result};
use auditrail_core::types::{Actor, EntityId};
use auditrail_core::{ChangeRecord, ChangeSet, ChangeSink, ExError};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CHANGE_COLUMNS: &str =
    "id, entity_type, entity_id, field_name, old_value, new_value, changed_at, changed_by, comment";

/// A change-log row as read back from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChange {
    /// Insertion sequence
    pub id: i64,
    pub entity_type: String,
    pub entity_id: EntityId,
    pub field_name: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub changed_at: DateTime<Utc>,
    pub changed_by: Actor,
    pub comment: Option<String>,
}

/// Change sink writing to the `change_log` table
///
/// Each change set is inserted in its own transaction, so a batch lands
/// completely or not at all.
pub struct SqliteChangeSink<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteChangeSink<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn insert_batch(&self, change_set: &ChangeSet) -> Result<()> {
        let tx = self.conn.unchecked_transaction().map_err(from_rusqlite)?;
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT INTO change_log
                        (entity_type, entity_id, field_name, old_value, new_value, changed_at, changed_by, comment)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .map_err(from_rusqlite)?;

            for record in change_set {
                stmt.execute(rusqlite::params![
                    record.entity_type,
                    record.entity_id.as_str(),
                    record.field_name,
                    encode_value("old_value", record.old_value.as_ref())?,
                    encode_value("new_value", record.new_value.as_ref())?,
                    encode_timestamp(&record.changed_at),
                    record.changed_by.as_str(),
                    record.comment,
                ])
                .map_err(from_rusqlite)?;
            }
        }
        tx.commit().map_err(from_rusqlite)
    }
}

impl ChangeSink for SqliteChangeSink<'_> {
    fn persist(&self, change_set: &ChangeSet) -> std::result::Result<(), ExError> {
        if change_set.is_empty() {
            return Ok(());
        }

        self.insert_batch(change_set).map_err(|err| {
            let err = err.with_op("persist_change_set");
            match change_set.records().first() {
                Some(ChangeRecord {
                    entity_type,
                    entity_id,
                    ..
                }) => err
                    .with_entity_type(entity_type.as_str())
                    .with_entity_id(entity_id.as_str()),
                None => err,
            }
        })
    }
}

/// Read access to the change log
pub struct ChangeLogQuery;

impl ChangeLogQuery {
    /// Every change recorded for one entity, in insertion order
    pub fn for_entity(conn: &Connection, entity_id: &EntityId) -> Result<Vec<StoredChange>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM change_log WHERE entity_id = ?1 ORDER BY id",
                CHANGE_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([entity_id.as_str()], raw_change_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter().map(RawChange::decode).collect()
    }

    /// The `limit` most recent changes across all entities, newest first
    pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<StoredChange>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM change_log ORDER BY id DESC LIMIT ?1",
                CHANGE_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map([limit], raw_change_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter().map(RawChange::decode).collect()
    }

    /// Number of change-log rows
    pub fn count(conn: &Connection) -> Result<u64> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM change_log", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Row with its JSON and timestamp columns still encoded
struct RawChange {
    id: i64,
    entity_type: String,
    entity_id: String,
    field_name: String,
    old_value: Option<String>,
    new_value: Option<String>,
    changed_at: String,
    changed_by: String,
    comment: Option<String>,
}

impl RawChange {
    fn decode(self) -> Result<StoredChange> {
        Ok(StoredChange {
            id: self.id,
            entity_type: self.entity_type,
            entity_id: EntityId::from_string(self.entity_id),
            field_name: self.field_name,
            old_value: decode_value("old_value", self.old_value)?,
            new_value: decode_value("new_value", self.new_value)?,
            changed_at: decode_timestamp(&self.changed_at)?,
            changed_by: Actor::new(self.changed_by),
            comment: self.comment,
        })
    }
}

fn raw_change_from_row(row: &Row<'_>) -> rusqlite::Result<RawChange> {
    Ok(RawChange {
        id: row.get(0)?,
        entity_type: row.get(1)?,
        entity_id: row.get(2)?,
        field_name: row.get(3)?,
        old_value: row.get(4)?,
        new_value: row.get(5)?,
        changed_at: row.get(6)?,
        changed_by: row.get(7)?,
        comment: row.get(8)?,
    })
}

fn encode_value(column: &str, value: Option<&Value>) -> Result<Option<String>> {
    value
        .map(|v| serde_json::to_string(v).map_err(|e| from_serde_json(column, e)))
        .transpose()
}

fn decode_value(column: &str, text: Option<String>) -> Result<Option<Value>> {
    match text {
        None => Ok(None),
        Some(text) => match serde_json::from_str(&text).map_err(|e| from_serde_json(column, e))? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        },
    }
}

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            ExError::new(auditrail_core::ExErrorKind::Serialization)
                .with_field("changed_at")
                .with_message(e.to_string())
        })
}
