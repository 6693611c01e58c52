//! Raw field values as read from a tracked record

use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

/// Declared type of a tracked field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Text,
    Uuid,
    Timestamp,
    /// Structured/nested value
    Json,
}

/// A field value captured from a record, before any normalization
///
/// Optional fields that are unset are represented as [`FieldValue::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<FixedOffset>),
    Json(serde_json::Value),
}

impl FieldValue {
    /// The kind of a non-null value
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(_) => Some(FieldKind::Bool),
            FieldValue::Int(_) => Some(FieldKind::Int),
            FieldValue::Float(_) => Some(FieldKind::Float),
            FieldValue::Text(_) => Some(FieldKind::Text),
            FieldValue::Uuid(_) => Some(FieldKind::Uuid),
            FieldValue::Timestamp(_) => Some(FieldKind::Timestamp),
            FieldValue::Json(_) => Some(FieldKind::Json),
        }
    }

    /// Whether this value counts as "unset" when a record is created
    ///
    /// Null, the empty string, and empty structured values (`null`, `""`,
    /// `[]`, `{}`) are empty. `false` and `0` are real values.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Json(v) => match v {
                serde_json::Value::Null => true,
                serde_json::Value::String(s) => s.is_empty(),
                serde_json::Value::Array(a) => a.is_empty(),
                serde_json::Value::Object(o) => o.is_empty(),
                _ => false,
            },
            _ => false,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        FieldValue::Uuid(v)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        FieldValue::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(v.into())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
