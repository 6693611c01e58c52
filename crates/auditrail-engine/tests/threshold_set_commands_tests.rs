#![allow(clippy::unwrap_used, clippy::expect_used)]

use auditrail_core::model::ThresholdSetInput;
use auditrail_core::ExErrorKind;
use auditrail_engine::commands::change_log::{change_log_for_entity, change_log_recent};
use auditrail_engine::commands::threshold_set::{
    threshold_set_create, threshold_set_get, threshold_set_list, threshold_set_modify,
};
use auditrail_engine::Attribution;
use auditrail_store::db::open_in_memory_migrated;
use serde_json::json;

fn summer() -> ThresholdSetInput {
    ThresholdSetInput {
        name: "Summer".to_string(),
        description: None,
        group: Some("seasonal".to_string()),
        active: false,
    }
}

#[test]
fn test_create_records_false_active_flag() {
    let conn = open_in_memory_migrated().unwrap();

    let id = threshold_set_create(summer(), &Attribution::default(), &conn).unwrap();

    let log = change_log_for_entity(&id, &conn).unwrap();
    let fields: Vec<_> = log.iter().map(|c| c.field_name.as_str()).collect();
    assert_eq!(fields, vec!["name", "group", "active"]);
    assert_eq!(log[2].new_value, Some(json!(false)));
    assert!(log.iter().all(|c| c.entity_type == "ThresholdSet"));
}

#[test]
fn test_modify_and_read_back() {
    let conn = open_in_memory_migrated().unwrap();
    let id = threshold_set_create(summer(), &Attribution::default(), &conn).unwrap();

    threshold_set_modify(
        &id,
        ThresholdSetInput {
            group: None,
            active: true,
            ..summer()
        },
        &Attribution::by("carol"),
        &conn,
    )
    .unwrap();

    let set = threshold_set_get(&id, &conn).unwrap().unwrap();
    assert!(set.active);
    assert_eq!(set.group, None);

    let recent = change_log_recent(2, &conn).unwrap();
    let fields: Vec<_> = recent.iter().map(|c| c.field_name.as_str()).collect();
    assert_eq!(fields, vec!["active", "group"]);
    assert_eq!(recent[1].old_value, Some(json!("seasonal")));
    assert_eq!(recent[1].new_value, None);
}

#[test]
fn test_group_too_long_is_rejected() {
    let conn = open_in_memory_migrated().unwrap();

    let err = threshold_set_create(
        ThresholdSetInput {
            group: Some("g".repeat(51)),
            ..summer()
        },
        &Attribution::default(),
        &conn,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::FieldTooLong);
    assert_eq!(err.field(), Some("group"));
    assert!(threshold_set_list(None, &conn).unwrap().is_empty());
}
