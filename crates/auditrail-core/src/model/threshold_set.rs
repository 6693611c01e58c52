use auditrail_core_types::EntityId;
use serde::{Deserialize, Serialize};

use crate::record::{FieldDescriptor, Record};
use crate::value::{FieldKind, FieldValue};

/// A named, switchable group of thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub group: Option<String>,
    pub active: bool,
}

/// The caller-supplied, mutable part of a [`ThresholdSet`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdSetInput {
    pub name: String,
    pub description: Option<String>,
    pub group: Option<String>,
    pub active: bool,
}

impl ThresholdSet {
    pub fn new(id: EntityId, input: ThresholdSetInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            group: input.group,
            active: input.active,
        }
    }

    /// Replace every mutable field
    pub fn apply(&mut self, input: ThresholdSetInput) {
        self.name = input.name;
        self.description = input.description;
        self.group = input.group;
        self.active = input.active;
    }
}

fn name(s: &ThresholdSet) -> FieldValue {
    s.name.as_str().into()
}

fn description(s: &ThresholdSet) -> FieldValue {
    s.description.as_deref().into()
}

fn group(s: &ThresholdSet) -> FieldValue {
    s.group.as_deref().into()
}

fn active(s: &ThresholdSet) -> FieldValue {
    s.active.into()
}

const THRESHOLD_SET_FIELDS: &[FieldDescriptor<ThresholdSet>] = &[
    FieldDescriptor::new("name", FieldKind::Text, name),
    FieldDescriptor::new("description", FieldKind::Text, description),
    FieldDescriptor::new("group", FieldKind::Text, group),
    FieldDescriptor::new("active", FieldKind::Bool, active),
];

impl Record for ThresholdSet {
    const ENTITY_TYPE: &'static str = "ThresholdSet";

    fn entity_id(&self) -> EntityId {
        self.id.clone()
    }

    fn fields() -> &'static [FieldDescriptor<Self>] {
        THRESHOLD_SET_FIELDS
    }
}
