#![allow(clippy::unwrap_used, clippy::expect_used)]

use auditrail_core::model::{Feature, FeatureInput};
use auditrail_core::types::{Actor, EntityId};
use auditrail_core::{
    diff, ChangeCapture, ChangeContext, ChangeSink, ExError, ExErrorKind, Snapshot,
};
use auditrail_store::db::{open_and_migrate, open_in_memory_migrated};
use auditrail_store::{ChangeLogQuery, SqliteChangeSink, SqliteRepo};
use rusqlite::Connection;
use serde_json::json;

fn pulse() -> Feature {
    Feature::new(
        EntityId::generate(),
        FeatureInput {
            name: "Pulse".to_string(),
            description: Some(String::new()),
            active: true,
            ..FeatureInput::default()
        },
    )
}

fn resolve(conn: &Connection, id: &EntityId) -> Result<Feature, ExError> {
    SqliteRepo::get_feature(conn, id)?.ok_or_else(|| {
        ExError::new(ExErrorKind::NotFound)
            .with_entity_type("Feature")
            .with_entity_id(id.as_str())
    })
}

#[test]
fn test_sink_writes_one_row_per_record() {
    let conn = open_in_memory_migrated().unwrap();
    let feature = pulse();
    let ctx = ChangeContext::now(Actor::new("alice"), Some("import".to_string()));
    let change_set = diff(None, &Snapshot::capture(&feature), &ctx);

    SqliteChangeSink::new(&conn).persist(&change_set).unwrap();

    let rows = ChangeLogQuery::for_entity(&conn, &feature.id).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].field_name, "name");
    assert_eq!(rows[0].old_value, None);
    assert_eq!(rows[0].new_value, Some(json!("Pulse")));
    assert_eq!(rows[1].field_name, "active");
    assert_eq!(rows[1].new_value, Some(json!(true)));
    assert!(rows.iter().all(|r| r.changed_by.as_str() == "alice"
        && r.comment.as_deref() == Some("import")
        && r.entity_type == "Feature"));
}

#[test]
fn test_failed_batch_leaves_no_partial_rows() {
    let conn = open_in_memory_migrated().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_active BEFORE INSERT ON change_log
         WHEN NEW.field_name = 'active'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
    let feature = pulse();
    let ctx = ChangeContext::now(Actor::system(), None);
    let change_set = diff(None, &Snapshot::capture(&feature), &ctx);

    let err = SqliteChangeSink::new(&conn).persist(&change_set).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(err.op(), Some("persist_change_set"));
    assert_eq!(err.entity_id(), Some(feature.id.as_str()));
    assert_eq!(ChangeLogQuery::count(&conn).unwrap(), 0);
}

#[test]
fn test_capture_around_repository_writes() {
    let conn = open_in_memory_migrated().unwrap();
    let sink = SqliteChangeSink::new(&conn);

    let create = ChangeCapture::new(
        |_: &Feature, created: Option<&EntityId>| match created {
            Some(id) => resolve(&conn, id),
            None => Err(ExError::new(ExErrorKind::NotFound)),
        },
        &sink,
    )
    .wrap(|f: &Feature| SqliteRepo::insert_feature(&conn, f).map(|()| f.id.clone()));

    let update = ChangeCapture::new(|f: &Feature, _: Option<&()>| resolve(&conn, &f.id), &sink)
        .wrap(|f: &Feature| SqliteRepo::update_feature(&conn, f));

    let mut feature = pulse();
    create(&feature).unwrap();
    feature.active = false;
    feature.default_threshold = Some(80.0);
    update(&feature).unwrap();

    let rows = ChangeLogQuery::for_entity(&conn, &feature.id).unwrap();
    let fields: Vec<_> = rows.iter().map(|r| r.field_name.as_str()).collect();
    assert_eq!(fields, vec!["name", "active", "default_threshold", "active"]);
    assert_eq!(rows[3].old_value, Some(json!(true)));
    assert_eq!(rows[3].new_value, Some(json!(false)));

    let recent = ChangeLogQuery::recent(&conn, 2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, rows[3].id);
    assert_eq!(recent[1].id, rows[2].id);
}

#[test]
fn test_change_log_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let feature = pulse();

    {
        let conn = open_and_migrate(&path).unwrap();
        let ctx = ChangeContext::now(Actor::system(), None);
        let change_set = diff(None, &Snapshot::capture(&feature), &ctx);
        SqliteChangeSink::new(&conn).persist(&change_set).unwrap();
    }

    let conn = open_and_migrate(&path).unwrap();
    let rows = ChangeLogQuery::for_entity(&conn, &feature.id).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].changed_by.is_system());
}
