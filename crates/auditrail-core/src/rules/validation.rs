//! Column-width and required-field checks
//!
//! Limits match the widths of the setpoint tables.

use crate::errors::{AuditError, Result};
use crate::model::{FeatureInput, ThresholdSetInput};

pub const NAME_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 250;
pub const LABEL_MAX_LEN: usize = 50;

/// Validate feature input before insert or full replacement
///
/// # Errors
///
/// * `InvalidName` - name is empty or whitespace-only
/// * `FieldTooLong` - a text field exceeds its column width
pub fn validate_feature_input(input: &FeatureInput) -> Result<()> {
    validate_name(&input.name)?;
    check_len("description", input.description.as_deref(), DESCRIPTION_MAX_LEN)?;
    check_len("type", input.feature_type.as_deref(), LABEL_MAX_LEN)?;
    check_len("priority", input.priority.as_deref(), LABEL_MAX_LEN)?;
    Ok(())
}

/// Validate threshold set input before insert or full replacement
///
/// # Errors
///
/// * `InvalidName` - name is empty or whitespace-only
/// * `FieldTooLong` - a text field exceeds its column width
pub fn validate_threshold_set_input(input: &ThresholdSetInput) -> Result<()> {
    validate_name(&input.name)?;
    check_len("description", input.description.as_deref(), DESCRIPTION_MAX_LEN)?;
    check_len("group", input.group.as_deref(), LABEL_MAX_LEN)?;
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AuditError::InvalidName {
            reason: "Name cannot be empty or whitespace-only".to_string(),
        });
    }
    check_len("name", Some(name), NAME_MAX_LEN)
}

fn check_len(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    let actual = value.map_or(0, |v| v.chars().count());
    if actual > max {
        return Err(AuditError::FieldTooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(name: &str) -> FeatureInput {
        FeatureInput {
            name: name.to_string(),
            active: true,
            ..FeatureInput::default()
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            validate_feature_input(&feature("  \t")),
            Err(AuditError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_name_width_limit() {
        assert!(validate_feature_input(&feature(&"n".repeat(50))).is_ok());
        match validate_feature_input(&feature(&"n".repeat(51))) {
            Err(AuditError::FieldTooLong { field, max, actual }) => {
                assert_eq!(field, "name");
                assert_eq!(max, 50);
                assert_eq!(actual, 51);
            }
            other => panic!("Expected FieldTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_description_width_counts_chars_not_bytes() {
        let mut input = feature("Pulse");
        input.description = Some("é".repeat(250));
        assert!(validate_feature_input(&input).is_ok());
    }

    #[test]
    fn test_threshold_set_group_limit() {
        let input = ThresholdSetInput {
            name: "Summer".to_string(),
            group: Some("g".repeat(51)),
            ..ThresholdSetInput::default()
        };
        assert!(matches!(
            validate_threshold_set_input(&input),
            Err(AuditError::FieldTooLong { ref field, .. }) if field == "group"
        ));
    }
}
