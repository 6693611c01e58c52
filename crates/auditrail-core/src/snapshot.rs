//! Point-in-time copies of tracked records

use crate::record::Record;
use crate::value::FieldValue;
use auditrail_core_types::EntityId;

/// Immutable copy of a record's tracked field values
///
/// Owns its values, so later mutation of the live record cannot leak into a
/// snapshot taken before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    entity_type: &'static str,
    entity_id: EntityId,
    values: Vec<(&'static str, FieldValue)>,
}

impl Snapshot {
    /// Read every declared field of `record`
    pub fn capture<R: Record>(record: &R) -> Self {
        let values = R::fields()
            .iter()
            .map(|field| {
                let value = field.read(record);
                debug_assert!(
                    value.kind().map_or(true, |kind| kind == field.kind),
                    "field {}.{} declared {:?} but produced {:?}",
                    R::ENTITY_TYPE,
                    field.name,
                    field.kind,
                    value
                );
                (field.name, value)
            })
            .collect();

        Self {
            entity_type: R::ENTITY_TYPE,
            entity_id: record.entity_id(),
            values,
        }
    }

    /// Snapshot an optional record; an absent record yields no snapshot
    pub fn capture_optional<R: Record>(record: Option<&R>) -> Option<Self> {
        record.map(Self::capture)
    }

    /// Build a snapshot from already-extracted values, keeping their order
    pub fn from_values(
        entity_type: &'static str,
        entity_id: EntityId,
        values: Vec<(&'static str, FieldValue)>,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            values,
        }
    }

    pub fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Value of a field, if the field is part of this snapshot
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Fields in declared order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldDescriptor;
    use crate::value::FieldKind;

    struct Gauge {
        id: EntityId,
        label: String,
        limit: Option<f64>,
    }

    fn gauge_label(g: &Gauge) -> FieldValue {
        g.label.as_str().into()
    }

    fn gauge_limit(g: &Gauge) -> FieldValue {
        g.limit.into()
    }

    const GAUGE_FIELDS: &[FieldDescriptor<Gauge>] = &[
        FieldDescriptor::new("label", FieldKind::Text, gauge_label),
        FieldDescriptor::new("limit", FieldKind::Float, gauge_limit),
    ];

    impl Record for Gauge {
        const ENTITY_TYPE: &'static str = "Gauge";

        fn entity_id(&self) -> EntityId {
            self.id.clone()
        }

        fn fields() -> &'static [FieldDescriptor<Self>] {
            GAUGE_FIELDS
        }
    }

    fn gauge() -> Gauge {
        Gauge {
            id: EntityId::from_string("g1".to_string()),
            label: "inlet".to_string(),
            limit: None,
        }
    }

    #[test]
    fn test_capture_reads_fields_in_declared_order() {
        let snap = Snapshot::capture(&gauge());
        let names: Vec<_> = snap.iter().map(|(name, _)| name).collect();

        assert_eq!(names, vec!["label", "limit"]);
        assert_eq!(snap.entity_type(), "Gauge");
        assert_eq!(snap.entity_id().as_str(), "g1");
        assert_eq!(snap.get("limit"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_snapshot_is_independent_of_later_mutation() {
        let mut live = gauge();
        let snap = Snapshot::capture(&live);

        live.label = "outlet".to_string();
        live.limit = Some(3.5);

        assert_eq!(snap.get("label"), Some(&FieldValue::Text("inlet".into())));
        assert_eq!(snap.get("limit"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_capture_optional_absent_record() {
        assert!(Snapshot::capture_optional::<Gauge>(None).is_none());
        assert!(Snapshot::capture_optional(Some(&gauge())).is_some());
    }

    #[test]
    fn test_unknown_field_lookup() {
        assert!(Snapshot::capture(&gauge()).get("nope").is_none());
    }
}
