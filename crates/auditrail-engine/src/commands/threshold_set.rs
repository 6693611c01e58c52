//! Threshold set command handlers with boundary logging.

#![allow(clippy::result_large_err)]

use super::{audited, not_found, Attribution, Mutation};
use auditrail_core::model::{ThresholdSet, ThresholdSetInput};
use auditrail_core::rules::validate_threshold_set_input;
use auditrail_core::types::EntityId;
use auditrail_core::{log_op_end, log_op_error, log_op_start};
use auditrail_store::errors::Result;
use auditrail_store::{SqliteChangeSink, SqliteRepo};
use rusqlite::Connection;

/// Create a threshold set and record its initial field values
///
/// ## Errors
///
/// - `InvalidName` / `FieldTooLong`: validation failed
/// - `Persistence`: database error
pub fn threshold_set_create(
    input: ThresholdSetInput,
    attribution: &Attribution,
    conn: &Connection,
) -> Result<EntityId> {
    log_op_start!("threshold_set_create", name = input.name.as_str());
    let start = std::time::Instant::now();

    let result = threshold_set_create_impl(input, attribution, conn).map_err(|e| {
        log_op_error!(
            "threshold_set_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "threshold_set_create",
        duration_ms = start.elapsed().as_millis() as u64,
        entity_id = result.as_str()
    );

    Ok(result)
}

fn threshold_set_create_impl(
    input: ThresholdSetInput,
    attribution: &Attribution,
    conn: &Connection,
) -> Result<EntityId> {
    validate_threshold_set_input(&input)?;

    let mutation = Mutation {
        id: EntityId::generate(),
        input,
        attribution: attribution.clone(),
    };
    let sink = SqliteChangeSink::new(conn);

    let capture = audited(conn, &sink, SqliteRepo::get_threshold_set);
    let result = capture.call(&mutation, |m| -> Result<EntityId> {
        let set = ThresholdSet::new(m.id.clone(), m.input.clone());
        SqliteRepo::insert_threshold_set(conn, &set)?;
        Ok(set.id)
    });
    result
}

/// Replace every mutable field of a threshold set and record what changed
///
/// ## Errors
///
/// - `NotFound`: no threshold set with this id
/// - `InvalidName` / `FieldTooLong`: validation failed
/// - `Persistence`: database error
pub fn threshold_set_modify(
    id: &EntityId,
    input: ThresholdSetInput,
    attribution: &Attribution,
    conn: &Connection,
) -> Result<ThresholdSet> {
    log_op_start!("threshold_set_modify", entity_id = id.as_str());
    let start = std::time::Instant::now();

    let result = threshold_set_modify_impl(id, input, attribution, conn).map_err(|e| {
        log_op_error!(
            "threshold_set_modify",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = id.as_str()
        );
        e
    })?;

    log_op_end!(
        "threshold_set_modify",
        duration_ms = start.elapsed().as_millis() as u64,
        entity_id = id.as_str()
    );

    Ok(result)
}

fn threshold_set_modify_impl(
    id: &EntityId,
    input: ThresholdSetInput,
    attribution: &Attribution,
    conn: &Connection,
) -> Result<ThresholdSet> {
    validate_threshold_set_input(&input)?;

    let mutation = Mutation {
        id: id.clone(),
        input,
        attribution: attribution.clone(),
    };
    let sink = SqliteChangeSink::new(conn);

    let capture = audited(conn, &sink, SqliteRepo::get_threshold_set);
    let result = capture.call(&mutation, |m| -> Result<ThresholdSet> {
        let mut set = SqliteRepo::get_threshold_set(conn, &m.id)?
            .ok_or_else(|| not_found("ThresholdSet", &m.id))?;
        set.apply(m.input.clone());
        SqliteRepo::update_threshold_set(conn, &set)?;
        Ok(set)
    });
    result
}

pub fn threshold_set_get(id: &EntityId, conn: &Connection) -> Result<Option<ThresholdSet>> {
    log_op_start!("threshold_set_get", entity_id = id.as_str());
    let start = std::time::Instant::now();

    let result = SqliteRepo::get_threshold_set(conn, id).map_err(|e| {
        log_op_error!(
            "threshold_set_get",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "threshold_set_get",
        duration_ms = start.elapsed().as_millis() as u64,
        found = result.is_some()
    );

    Ok(result)
}

pub fn threshold_set_list(amount: Option<usize>, conn: &Connection) -> Result<Vec<ThresholdSet>> {
    log_op_start!("threshold_set_list");
    let start = std::time::Instant::now();

    let result = SqliteRepo::list_threshold_sets(conn, amount).map_err(|e| {
        log_op_error!(
            "threshold_set_list",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "threshold_set_list",
        duration_ms = start.elapsed().as_millis() as u64,
        count = result.len() as u64
    );

    Ok(result)
}
