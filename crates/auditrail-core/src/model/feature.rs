use auditrail_core_types::EntityId;
use serde::{Deserialize, Serialize};

use crate::record::{FieldDescriptor, Record};
use crate::value::{FieldKind, FieldValue};

/// A measurable feature that thresholds are defined against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    /// Stored and audited as `type`
    #[serde(rename = "type")]
    pub feature_type: Option<String>,
    pub priority: Option<String>,
    pub default_threshold: Option<f64>,
    pub active: bool,
}

/// The caller-supplied, mutable part of a [`Feature`]
///
/// Used for both creation and full-replacement modification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub feature_type: Option<String>,
    pub priority: Option<String>,
    pub default_threshold: Option<f64>,
    pub active: bool,
}

impl Feature {
    /// Build a feature from validated input
    pub fn new(id: EntityId, input: FeatureInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            feature_type: input.feature_type,
            priority: input.priority,
            default_threshold: input.default_threshold,
            active: input.active,
        }
    }

    /// Replace every mutable field
    pub fn apply(&mut self, input: FeatureInput) {
        self.name = input.name;
        self.description = input.description;
        self.feature_type = input.feature_type;
        self.priority = input.priority;
        self.default_threshold = input.default_threshold;
        self.active = input.active;
    }
}

fn name(f: &Feature) -> FieldValue {
    f.name.as_str().into()
}

fn description(f: &Feature) -> FieldValue {
    f.description.as_deref().into()
}

fn feature_type(f: &Feature) -> FieldValue {
    f.feature_type.as_deref().into()
}

fn priority(f: &Feature) -> FieldValue {
    f.priority.as_deref().into()
}

fn default_threshold(f: &Feature) -> FieldValue {
    f.default_threshold.into()
}

fn active(f: &Feature) -> FieldValue {
    f.active.into()
}

const FEATURE_FIELDS: &[FieldDescriptor<Feature>] = &[
    FieldDescriptor::new("name", FieldKind::Text, name),
    FieldDescriptor::new("description", FieldKind::Text, description),
    FieldDescriptor::new("type", FieldKind::Text, feature_type),
    FieldDescriptor::new("priority", FieldKind::Text, priority),
    FieldDescriptor::new("default_threshold", FieldKind::Float, default_threshold),
    FieldDescriptor::new("active", FieldKind::Bool, active),
];

impl Record for Feature {
    const ENTITY_TYPE: &'static str = "Feature";

    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }

    fn fields() -> &'static [FieldDescriptor<Self>] {
        FEATURE_FIELDS
    }
}
