//! Feature command handlers with boundary logging.

#![allow(clippy::result_large_err)]

use super::{audited, not_found, Attribution, Mutation};
use auditrail_core::model::{Feature, FeatureInput};
use auditrail_core::rules::validate_feature_input;
use auditrail_core::types::EntityId;
use auditrail_core::{log_op_end, log_op_error, log_op_start};
use auditrail_store::errors::Result;
use auditrail_store::{SqliteChangeSink, SqliteRepo};
use rusqlite::Connection;

/// Create a feature and record its initial field values
///
/// ## Returns
///
/// The generated feature id (UUIDv7)
///
/// ## Errors
///
/// - `InvalidName` / `FieldTooLong`: validation failed
/// - `Persistence`: database error
///
/// A failure to write the change log is logged, not returned.
pub fn feature_create(
    input: FeatureInput,
    attribution: &Attribution,
    conn: &Connection,
) -> Result<EntityId> {
    log_op_start!("feature_create", name = input.name.as_str());
    let start = std::time::Instant::now();

    let result = feature_create_impl(input, attribution, conn).map_err(|e| {
        log_op_error!(
            "feature_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "feature_create",
        duration_ms = start.elapsed().as_millis() as u64,
        entity_id = result.as_str()
    );

    Ok(result)
}

fn feature_create_impl(
    input: FeatureInput,
    attribution: &Attribution,
    conn: &Connection,
) -> Result<EntityId> {
    validate_feature_input(&input)?;

    let mutation = Mutation {
        id: EntityId::generate(),
        input,
        attribution: attribution.clone(),
    };
    let sink = SqliteChangeSink::new(conn);

    let capture = audited(conn, &sink, SqliteRepo::get_feature);
    let result = capture.call(&mutation, |m| -> Result<EntityId> {
        let feature = Feature::new(m.id.clone(), m.input.clone());
        SqliteRepo::insert_feature(conn, &feature)?;
        Ok(feature.id)
    });
    result
}

/// Replace every mutable field of a feature and record what changed
///
/// ## Errors
///
/// - `NotFound`: no feature with this id
/// - `InvalidName` / `FieldTooLong`: validation failed
/// - `Persistence`: database error
pub fn feature_modify(
    id: &EntityId,
    input: FeatureInput,
    attribution: &Attribution,
    conn: &Connection,
) -> Result<Feature> {
    log_op_start!("feature_modify", entity_id = id.as_str());
    let start = std::time::Instant::now();

    let result = feature_modify_impl(id, input, attribution, conn).map_err(|e| {
        log_op_error!(
            "feature_modify",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = id.as_str()
        );
        e
    })?;

    log_op_end!(
        "feature_modify",
        duration_ms = start.elapsed().as_millis() as u64,
        entity_id = id.as_str()
    );

    Ok(result)
}

fn feature_modify_impl(
    id: &EntityId,
    input: FeatureInput,
    attribution: &Attribution,
    conn: &Connection,
) -> Result<Feature> {
    validate_feature_input(&input)?;

    let mutation = Mutation {
        id: id.clone(),
        input,
        attribution: attribution.clone(),
    };
    let sink = SqliteChangeSink::new(conn);

    let capture = audited(conn, &sink, SqliteRepo::get_feature);
    let result = capture.call(&mutation, |m| -> Result<Feature> {
        let mut feature =
            SqliteRepo::get_feature(conn, &m.id)?.ok_or_else(|| not_found("Feature", &m.id))?;
        feature.apply(m.input.clone());
        SqliteRepo::update_feature(conn, &feature)?;
        Ok(feature)
    });
    result
}

/// Load a feature by id
pub fn feature_get(id: &EntityId, conn: &Connection) -> Result<Option<Feature>> {
    log_op_start!("feature_get", entity_id = id.as_str());
    let start = std::time::Instant::now();

    let result = SqliteRepo::get_feature(conn, id).map_err(|e| {
        log_op_error!(
            "feature_get",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "feature_get",
        duration_ms = start.elapsed().as_millis() as u64,
        found = result.is_some()
    );

    Ok(result)
}

/// List features by name, at most `amount` of them when given
pub fn feature_list(amount: Option<usize>, conn: &Connection) -> Result<Vec<Feature>> {
    log_op_start!("feature_list");
    let start = std::time::Instant::now();

    let result = SqliteRepo::list_features(conn, amount).map_err(|e| {
        log_op_error!(
            "feature_list",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "feature_list",
        duration_ms = start.elapsed().as_millis() as u64,
        count = result.len() as u64
    );

    Ok(result)
}
