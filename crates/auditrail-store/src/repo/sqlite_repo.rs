//! SQLite repository implementation
//!
//! Persists features and threshold sets. Writes are plain statements on the
//! given connection; callers that need atomicity open the transaction.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use auditrail_core::errors::AuditError;
use auditrail_core::model::{Feature, ThresholdSet};
use auditrail_core::types::EntityId;
use auditrail_core::ExError;
use rusqlite::{Connection, OptionalExtension, Row};

const FEATURE_COLUMNS: &str = "id, name, description, type, priority, default_threshold, active";
const THRESHOLD_SET_COLUMNS: &str = "id, name, description, \"group\", active";

/// SQLite repository for features and threshold sets
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert a new feature
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if a feature with the same id is stored.
    pub fn insert_feature(conn: &Connection, feature: &Feature) -> Result<()> {
        if Self::get_feature(conn, &feature.id)?.is_some() {
            return Err(already_exists("Feature", &feature.id));
        }

        conn.execute(
            "INSERT INTO features (id, name, description, type, priority, default_threshold, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                feature.id.as_str(),
                feature.name,
                feature.description,
                feature.feature_type,
                feature.priority,
                feature.default_threshold,
                feature.active,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Overwrite every mutable column of an existing feature
    ///
    /// # Errors
    ///
    /// `NotFound` if no row has the feature's id.
    pub fn update_feature(conn: &Connection, feature: &Feature) -> Result<()> {
        let updated = conn
            .execute(
                "UPDATE features SET
                    name = ?2,
                    description = ?3,
                    type = ?4,
                    priority = ?5,
                    default_threshold = ?6,
                    active = ?7
                 WHERE id = ?1",
                rusqlite::params![
                    feature.id.as_str(),
                    feature.name,
                    feature.description,
                    feature.feature_type,
                    feature.priority,
                    feature.default_threshold,
                    feature.active,
                ],
            )
            .map_err(from_rusqlite)?;

        if updated == 0 {
            return Err(not_found("Feature", &feature.id));
        }
        Ok(())
    }

    /// Load a feature by id
    pub fn get_feature(conn: &Connection, id: &EntityId) -> Result<Option<Feature>> {
        conn.query_row(
            &format!("SELECT {} FROM features WHERE id = ?1", FEATURE_COLUMNS),
            [id.as_str()],
            feature_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List features ordered by name, at most `limit` of them when given
    pub fn list_features(conn: &Connection, limit: Option<usize>) -> Result<Vec<Feature>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM features ORDER BY name, id LIMIT ?1",
                FEATURE_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let features = stmt
            .query_map([sql_limit(limit)], feature_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(features)
    }

    /// Insert a new threshold set
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if a threshold set with the same id is stored.
    pub fn insert_threshold_set(conn: &Connection, set: &ThresholdSet) -> Result<()> {
        if Self::get_threshold_set(conn, &set.id)?.is_some() {
            return Err(already_exists("ThresholdSet", &set.id));
        }

        conn.execute(
            "INSERT INTO threshold_sets (id, name, description, \"group\", active)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![set.id.as_str(), set.name, set.description, set.group, set.active],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Overwrite every mutable column of an existing threshold set
    ///
    /// # Errors
    ///
    /// `NotFound` if no row has the set's id.
    pub fn update_threshold_set(conn: &Connection, set: &ThresholdSet) -> Result<()> {
        let updated = conn
            .execute(
                "UPDATE threshold_sets SET
                    name = ?2,
                    description = ?3,
                    \"group\" = ?4,
                    active = ?5
                 WHERE id = ?1",
                rusqlite::params![set.id.as_str(), set.name, set.description, set.group, set.active],
            )
            .map_err(from_rusqlite)?;

        if updated == 0 {
            return Err(not_found("ThresholdSet", &set.id));
        }
        Ok(())
    }

    pub fn get_threshold_set(conn: &Connection, id: &EntityId) -> Result<Option<ThresholdSet>> {
        conn.query_row(
            &format!(
                "SELECT {} FROM threshold_sets WHERE id = ?1",
                THRESHOLD_SET_COLUMNS
            ),
            [id.as_str()],
            threshold_set_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn list_threshold_sets(conn: &Connection, limit: Option<usize>) -> Result<Vec<ThresholdSet>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM threshold_sets ORDER BY name, id LIMIT ?1",
                THRESHOLD_SET_COLUMNS
            ))
            .map_err(from_rusqlite)?;

        let sets = stmt
            .query_map([sql_limit(limit)], threshold_set_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(sets)
    }
}

fn feature_from_row(row: &Row<'_>) -> rusqlite::Result<Feature> {
    Ok(Feature {
        id: EntityId::from_string(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        feature_type: row.get(3)?,
        priority: row.get(4)?,
        default_threshold: row.get(5)?,
        active: row.get(6)?,
    })
}

fn threshold_set_from_row(row: &Row<'_>) -> rusqlite::Result<ThresholdSet> {
    Ok(ThresholdSet {
        id: EntityId::from_string(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        group: row.get(3)?,
        active: row.get(4)?,
    })
}

/// SQLite treats a negative LIMIT as "no limit"
fn sql_limit(limit: Option<usize>) -> i64 {
    limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX))
}

fn not_found(entity_type: &str, id: &EntityId) -> ExError {
    ExError::from(AuditError::NotFound {
        entity_type: entity_type.to_string(),
        entity_id: id.to_string(),
    })
    .with_op("sqlite_update")
}

fn already_exists(entity_type: &str, id: &EntityId) -> ExError {
    ExError::from(AuditError::AlreadyExists {
        entity_type: entity_type.to_string(),
        entity_id: id.to_string(),
    })
    .with_op("sqlite_insert")
}
