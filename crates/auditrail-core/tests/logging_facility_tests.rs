#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use auditrail_core::errors::AuditError;
use auditrail_core::logging_facility::test_capture::init_test_capture;
use auditrail_core::monitor::{CaptureCounters, CaptureStage};
use auditrail_core::types::schema::{
    EVENT_CAPTURE_PERSISTED, EVENT_CAPTURE_SKIPPED, EVENT_END, EVENT_END_ERROR, EVENT_START,
    FIELD_CAPTURE_STAGE, FIELD_CHANGED_BY, FIELD_CHANGE_COUNT, FIELD_COMPONENT,
    FIELD_DURATION_MS, FIELD_ENTITY_ID, FIELD_ENTITY_TYPE, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_OP,
};
use auditrail_core::{log_op_end, log_op_error, log_op_start, ChangeCapture, MemorySink};
use common::{pulse, FailingSink, FeatureArgs, FeatureTable};
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_with(FIELD_OP, op_name);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = AuditError::NotFound {
        entity_type: "Feature".to_string(),
        entity_id: "f1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.events_with(FIELD_OP, op_name);
    assert_eq!(error_events.len(), 1);
    assert_eq!(error_events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(error_events[0].level, Level::ERROR);
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].field(FIELD_ERR_KIND), Some("NotFound"));
    assert!(error_events[0].field(FIELD_COMPONENT).is_some());
}

#[test]
fn test_persisted_change_set_is_logged_at_debug() {
    let capture = init_test_capture();
    let table = FeatureTable::new();
    let sink = MemorySink::new();
    let create = ChangeCapture::new(|a, r| table.resolve(a, r), &sink)
        .wrap(|a: &FeatureArgs| table.insert(a));

    let feature = create(&FeatureArgs {
        input: pulse(),
        ..FeatureArgs::default()
    })
    .unwrap();

    let events = capture.events_with(FIELD_ENTITY_ID, feature.id.as_str());
    let persisted: Vec<_> = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_CAPTURE_PERSISTED))
        .collect();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].level, Level::DEBUG);
    assert_eq!(persisted[0].field(FIELD_CHANGE_COUNT), Some("2"));
    assert_eq!(persisted[0].field(FIELD_CHANGED_BY), Some("system"));
}

#[test]
fn test_sink_failure_is_logged_at_warn() {
    let capture = init_test_capture();
    let table = FeatureTable::new();
    let create = ChangeCapture::new(|a, r| table.resolve(a, r), &FailingSink)
        .wrap(|a: &FeatureArgs| table.insert(a));

    let feature = create(&FeatureArgs {
        input: pulse(),
        ..FeatureArgs::default()
    })
    .unwrap();

    let skipped: Vec<_> = capture
        .events_with(FIELD_ENTITY_ID, feature.id.as_str())
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_CAPTURE_SKIPPED))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].level, Level::WARN);
    assert_eq!(
        skipped[0].field(FIELD_CAPTURE_STAGE),
        Some(CaptureStage::Persist.as_str())
    );
    assert_eq!(skipped[0].field(FIELD_ERR_CODE), Some("ERR_PERSISTENCE"));
}

#[test]
fn test_unresolved_prior_state_is_logged_at_debug() {
    let capture = init_test_capture();
    let mark = capture.mark();
    let table = FeatureTable::new();
    let sink = MemorySink::new();
    let create = ChangeCapture::new(|a, r| table.resolve(a, r), &sink)
        .wrap(|a: &FeatureArgs| table.insert(a));

    create(&FeatureArgs {
        input: pulse(),
        ..FeatureArgs::default()
    })
    .unwrap();

    let skipped: Vec<_> = capture
        .events_since(mark)
        .into_iter()
        .filter(|e| e.field(FIELD_CAPTURE_STAGE) == Some(CaptureStage::ResolveBefore.as_str()))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].level, Level::DEBUG);
    assert_eq!(skipped[0].event.as_deref(), Some(EVENT_CAPTURE_SKIPPED));
    assert_eq!(skipped[0].field(FIELD_ENTITY_TYPE), Some("Feature"));
    assert_eq!(skipped[0].field(FIELD_ERR_CODE), Some("ERR_INVALID_INPUT"));
    assert_eq!(sink.batch_count(), 1);
}

#[test]
fn test_unresolved_after_state_is_logged_at_warn() {
    let capture = init_test_capture();
    let mark = capture.mark();
    let table = FeatureTable::new();
    let sink = MemorySink::new();
    let counters = CaptureCounters::new();
    let create_then_vanish = ChangeCapture::new(|a, r| table.resolve(a, r), &sink)
        .with_monitor(&counters)
        .wrap(|a: &FeatureArgs| {
            let feature = table.insert(a)?;
            table.remove(&feature.id);
            Ok::<_, AuditError>(feature)
        });

    create_then_vanish(&FeatureArgs {
        input: pulse(),
        ..FeatureArgs::default()
    })
    .unwrap();

    let skipped: Vec<_> = capture
        .events_since(mark)
        .into_iter()
        .filter(|e| e.field(FIELD_CAPTURE_STAGE) == Some(CaptureStage::ResolveAfter.as_str()))
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].level, Level::WARN);
    assert_eq!(skipped[0].event.as_deref(), Some(EVENT_CAPTURE_SKIPPED));
    assert_eq!(skipped[0].field(FIELD_ENTITY_TYPE), Some("Feature"));
    assert_eq!(skipped[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(counters.resolve_failures(), 1);
    assert_eq!(sink.batch_count(), 0);
}
