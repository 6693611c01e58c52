use thiserror::Error;

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidName,
    FieldTooLong,
    InvalidEntityId,
    NotFound,
    AlreadyExists,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidName => "ERR_INVALID_NAME",
            ExErrorKind::FieldTooLong => "ERR_FIELD_TOO_LONG",
            ExErrorKind::InvalidEntityId => "ERR_INVALID_ENTITY_ID",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context about the operation and
/// the audited entity it concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_type: Option<String>,
    entity_id: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_type: None,
            entity_id: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity type context
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_type) = &self.entity_type {
            write!(f, " (entity_type: {})", entity_type)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by the setpoint models and their validation rules
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    /// A tracked entity was not found
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        entity_type: String,
        entity_id: String,
    },

    /// A tracked entity with the same ID already exists
    #[error("{entity_type} already exists: {entity_id}")]
    AlreadyExists {
        entity_type: String,
        entity_id: String,
    },

    /// Name is empty or whitespace-only
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    /// Text field exceeds its column width
    #[error("Field '{field}' is too long: {actual} chars (max {max})")]
    FieldTooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    /// Identifier is not a valid UUID
    #[error("Invalid entity id: {value}")]
    InvalidEntityId { value: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<AuditError> for ExError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::NotFound {
                entity_type,
                entity_id,
            } => ExError::new(ExErrorKind::NotFound)
                .with_entity_type(entity_type.clone())
                .with_entity_id(entity_id)
                .with_message(format!("{} not found", entity_type)),

            AuditError::AlreadyExists {
                entity_type,
                entity_id,
            } => ExError::new(ExErrorKind::AlreadyExists)
                .with_entity_type(entity_type.clone())
                .with_entity_id(entity_id)
                .with_message(format!("{} already exists", entity_type)),

            AuditError::InvalidName { reason } => ExError::new(ExErrorKind::InvalidName)
                .with_field("name")
                .with_message(reason),

            AuditError::FieldTooLong { field, max, actual } => {
                ExError::new(ExErrorKind::FieldTooLong)
                    .with_field(field)
                    .with_message(format!("{} chars exceeds limit of {}", actual, max))
            }

            AuditError::InvalidEntityId { value } => ExError::new(ExErrorKind::InvalidEntityId)
                .with_entity_id(value)
                .with_message("Entity id is not a valid UUID"),

            AuditError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to AuditError
impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::InvalidName, "ERR_INVALID_NAME"),
            (ExErrorKind::FieldTooLong, "ERR_FIELD_TOO_LONG"),
            (ExErrorKind::InvalidEntityId, "ERR_INVALID_ENTITY_ID"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_not_found_conversion_keeps_context() {
        let err: ExError = AuditError::NotFound {
            entity_type: "Feature".to_string(),
            entity_id: "f1".to_string(),
        }
        .into();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.entity_type(), Some("Feature"));
        assert_eq!(err.entity_id(), Some("f1"));
    }

    #[test]
    fn test_field_too_long_conversion() {
        let err: ExError = AuditError::FieldTooLong {
            field: "description".to_string(),
            max: 250,
            actual: 300,
        }
        .into();

        assert_eq!(err.code(), "ERR_FIELD_TOO_LONG");
        assert_eq!(err.field(), Some("description"));
        assert!(err.message().contains("250"));
    }

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("persist_change_set")
            .with_message("disk full")
            .with_entity_type("Feature");
        let text = err.to_string();

        assert!(text.starts_with("[ERR_PERSISTENCE]"));
        assert!(text.contains("persist_change_set"));
        assert!(text.contains("disk full"));
        assert!(text.contains("Feature"));
    }
}
