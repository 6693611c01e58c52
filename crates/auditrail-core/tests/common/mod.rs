//! Shared fixtures: an in-memory feature table and mutation arguments

#![allow(dead_code)]

use auditrail_core::errors::{ExError, ExErrorKind};
use auditrail_core::types::EntityId;
use auditrail_core::{AuditError, ChangeSet, ChangeSink, Feature, FeatureInput};
use std::cell::RefCell;
use std::collections::HashMap;

/// Arguments of a feature mutation, as a command handler would receive them
#[derive(Debug, Clone, Default)]
pub struct FeatureArgs {
    pub id: Option<EntityId>,
    pub input: FeatureInput,
    pub changed_by: Option<String>,
    pub comment: Option<String>,
}

/// A feature table that the operations and resolvers share
#[derive(Default)]
pub struct FeatureTable {
    rows: RefCell<HashMap<EntityId, Feature>>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, args: &FeatureArgs) -> Result<Feature, AuditError> {
        let feature = Feature::new(EntityId::generate(), args.input.clone());
        self.rows
            .borrow_mut()
            .insert(feature.id.clone(), feature.clone());
        Ok(feature)
    }

    pub fn modify(&self, args: &FeatureArgs) -> Result<Feature, AuditError> {
        let id = args.id.clone().ok_or_else(|| AuditError::InvalidEntityId {
            value: String::new(),
        })?;
        let mut rows = self.rows.borrow_mut();
        let feature = rows.get_mut(&id).ok_or_else(|| AuditError::NotFound {
            entity_type: "Feature".to_string(),
            entity_id: id.to_string(),
        })?;
        feature.apply(args.input.clone());
        Ok(feature.clone())
    }

    /// Resolve the affected feature: by the result when there is one,
    /// otherwise by the id argument
    pub fn resolve(&self, args: &FeatureArgs, result: Option<&Feature>) -> Result<Feature, ExError> {
        let id = result
            .map(|f| f.id.clone())
            .or_else(|| args.id.clone())
            .ok_or_else(|| {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_type("Feature")
                    .with_message("no feature id")
            })?;
        self.rows.borrow().get(&id).cloned().ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_entity_type("Feature")
                .with_entity_id(id.as_str())
        })
    }

    pub fn remove(&self, id: &EntityId) {
        self.rows.borrow_mut().remove(id);
    }
}

/// Sink that rejects every change set
pub struct FailingSink;

impl ChangeSink for FailingSink {
    fn persist(&self, _change_set: &ChangeSet) -> Result<(), ExError> {
        Err(ExError::new(ExErrorKind::Persistence)
            .with_op("failing_sink")
            .with_message("store unavailable"))
    }
}

pub fn pulse() -> FeatureInput {
    FeatureInput {
        name: "Pulse".to_string(),
        description: Some(String::new()),
        active: true,
        ..FeatureInput::default()
    }
}
