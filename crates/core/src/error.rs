//! Error types for schema construction

/// Error type for field and schema construction
///
/// Equality, hashing and lookup never fail; only building a field or
/// installing a field list can.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A field was built with an empty name or an unacceptable default value
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Two fields in one schema share a name or alias
    #[error("Two fields are given with the same name (or alias) of '{0}'")]
    DuplicateField(String),
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_field_message_names_identifier() {
        let err = SchemaError::DuplicateField("bar".to_string());
        assert_eq!(
            err.to_string(),
            "Two fields are given with the same name (or alias) of 'bar'"
        );
    }

    #[test]
    fn test_invalid_field_message() {
        let err = SchemaError::InvalidField("field name cannot be empty".to_string());
        assert!(err.to_string().starts_with("Invalid field:"));
    }
}
