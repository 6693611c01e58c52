//! Change log queries with boundary logging.

#![allow(clippy::result_large_err)]

use auditrail_core::types::EntityId;
use auditrail_core::{log_op_end, log_op_error, log_op_start};
use auditrail_store::errors::Result;
use auditrail_store::{ChangeLogQuery, StoredChange};
use rusqlite::Connection;

/// Full audit trail of one entity, oldest first
pub fn change_log_for_entity(entity_id: &EntityId, conn: &Connection) -> Result<Vec<StoredChange>> {
    log_op_start!("change_log_for_entity", entity_id = entity_id.as_str());
    let start = std::time::Instant::now();

    let result = ChangeLogQuery::for_entity(conn, entity_id).map_err(|e| {
        log_op_error!(
            "change_log_for_entity",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "change_log_for_entity",
        duration_ms = start.elapsed().as_millis() as u64,
        count = result.len() as u64
    );

    Ok(result)
}

/// The `limit` most recent changes, newest first
pub fn change_log_recent(limit: usize, conn: &Connection) -> Result<Vec<StoredChange>> {
    log_op_start!("change_log_recent", limit = limit as u64);
    let start = std::time::Instant::now();

    let result = ChangeLogQuery::recent(conn, limit).map_err(|e| {
        log_op_error!(
            "change_log_recent",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "change_log_recent",
        duration_ms = start.elapsed().as_millis() as u64,
        count = result.len() as u64
    );

    Ok(result)
}
