//! Value normalization for comparison and for storage
//!
//! Two total functions over [`FieldValue`]:
//!
//! - [`normalize_for_compare`] decides whether a field changed. It discards
//!   sub-second precision and the UTC offset of timestamps, and reduces
//!   structured values to a canonical, key-sorted encoding.
//! - [`normalize_for_store`] decides what is written to the change log. It
//!   keeps full precision and falls back to text for anything JSON cannot
//!   represent.

use crate::value::FieldValue;
use chrono::{NaiveDateTime, SecondsFormat, SubsecRound};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Comparison form of a field value
///
/// Only ever compared for equality; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparable {
    Null,
    Bool(bool),
    Int(i64),
    /// Bit pattern with `-0.0` folded into `0.0` and every NaN folded into one
    Float(u64),
    Text(String),
    Uuid(Uuid),
    /// Wall-clock time truncated to whole seconds, offset dropped
    Timestamp(NaiveDateTime),
    /// Canonical JSON text with object keys sorted at every depth
    Canonical(String),
}

/// Normalize a value for change detection
pub fn normalize_for_compare(value: &FieldValue) -> Comparable {
    match value {
        FieldValue::Null => Comparable::Null,
        FieldValue::Bool(b) => Comparable::Bool(*b),
        FieldValue::Int(i) => Comparable::Int(*i),
        FieldValue::Float(f) => Comparable::Float(float_bits(*f)),
        FieldValue::Text(s) => Comparable::Text(s.clone()),
        FieldValue::Uuid(u) => Comparable::Uuid(*u),
        FieldValue::Timestamp(ts) => Comparable::Timestamp(ts.naive_local().trunc_subsecs(0)),
        FieldValue::Json(v) => Comparable::Canonical(canonical_json(v)),
    }
}

/// Normalize a value for the change log
///
/// Timestamps become RFC 3339 text with their original offset and precision.
/// UUIDs and non-finite floats have no JSON form and are stored as text.
pub fn normalize_for_store(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Int(i) => Value::from(*i),
        FieldValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Uuid(u) => Value::String(u.hyphenated().to_string()),
        FieldValue::Timestamp(ts) => {
            Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, false))
        }
        FieldValue::Json(v) => v.clone(),
    }
}

/// Encode a JSON value with object keys sorted at every depth
///
/// Array order is significant and preserved.
pub fn canonical_json(value: &Value) -> String {
    sort_keys(value).to_string()
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn float_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0_f64.to_bits()
    } else {
        f.to_bits()
    }
}
