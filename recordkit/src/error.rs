//! Error types for record definition, construction and list mutation.
//!
//! - [`DataError`] - Everything the record engine itself can reject
//! - [`DefinitionError`] - Loading record definitions from JSON files
//!
//! `DataError` converts into `DefinitionError` automatically, so `?`
//! works when a definition file is turned into a [`crate::RecordType`].

use serde_json::Value;
use thiserror::Error;

use crate::validation::Kind;

// =============================================================================
// Data Errors
// =============================================================================

/// Errors raised while defining record types, constructing records or
/// mutating record lists.
///
/// Every failure is raised by the call that violates the contract. A failed
/// construction never yields a partially built record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// A field declared as required was not supplied.
    #[error("{0} is required")]
    MissingRequiredField(String),

    /// A name that is not a declared field of the record type.
    #[error("{field} is not a member of {type_name}")]
    UnknownField { type_name: String, field: String },

    /// `InstanceOf` / `InstanceOrNone` rejection.
    #[error("{field} is not an instance of {expected} (value was {value})")]
    TypeMismatch {
        field: String,
        expected: Kind,
        value: Value,
    },

    /// `OneOf` rejection.
    #[error("{value} is not a valid value for {field}")]
    InvalidEnumValue { field: String, value: Value },

    /// `Length` rejection.
    #[error("{field}: {value} has length {actual} but expected {expected}")]
    LengthMismatch {
        field: String,
        value: Value,
        actual: usize,
        expected: usize,
    },

    /// `Length` rejection for a value without a length.
    #[error("{value} has no length so is not a valid value for {field}")]
    NoLength { field: String, value: Value },

    /// `MustSatisfy` rejection.
    #[error("{field} failed validation (value was {value})")]
    PredicateFailed { field: String, value: Value },

    /// The record definition itself is malformed.
    #[error("Invalid record definition: {0}")]
    StructuralDefinitionError(String),

    /// A record of another type was offered to a record list.
    #[error("{list} only holds {expected} records (got {actual})")]
    WrongRecordType {
        list: String,
        expected: String,
        actual: String,
    },

    /// Scalar index past the end of a list.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A method that the record type does not declare.
    #[error("{type_name} has no method {method}")]
    UnknownMethod { type_name: String, method: String },
}

impl DataError {
    /// The field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            DataError::MissingRequiredField(field) => Some(field),
            DataError::UnknownField { field, .. }
            | DataError::TypeMismatch { field, .. }
            | DataError::InvalidEnumValue { field, .. }
            | DataError::LengthMismatch { field, .. }
            | DataError::NoLength { field, .. }
            | DataError::PredicateFailed { field, .. } => Some(field),
            _ => None,
        }
    }

    /// The offending value for validator rejections.
    pub fn value(&self) -> Option<&Value> {
        match self {
            DataError::TypeMismatch { value, .. }
            | DataError::InvalidEnumValue { value, .. }
            | DataError::LengthMismatch { value, .. }
            | DataError::NoLength { value, .. }
            | DataError::PredicateFailed { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Whether a field validator rejected the value.
    pub fn is_validation_failure(&self) -> bool {
        self.value().is_some()
    }
}

// =============================================================================
// Definition Errors
// =============================================================================

/// Errors while loading a record definition file.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// IO error.
    #[error("Failed to read definition: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error.
    #[error("Definition JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The definition parsed but does not describe a valid record type.
    #[error("{0}")]
    Data(#[from] DataError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for record operations.
pub type DataResult<T> = Result<T, DataError>;

/// Result type for definition loading.
pub type DefinitionResult<T> = Result<T, DefinitionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_conversion_chain() {
        let data_err = DataError::MissingRequiredField("title".into());
        let def_err: DefinitionError = data_err.into();
        assert!(def_err.to_string().contains("title"));
    }

    #[test]
    fn test_validation_error_format() {
        let err = DataError::LengthMismatch {
            field: "rgb".into(),
            value: json!([1, 2]),
            actual: 2,
            expected: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("rgb"));
        assert!(msg.contains("length 2 but expected 3"));
        assert_eq!(err.field(), Some("rgb"));
        assert_eq!(err.value(), Some(&json!([1, 2])));
        assert!(err.is_validation_failure());
    }

    #[test]
    fn test_structural_errors_are_not_validation_failures() {
        let err = DataError::UnknownField {
            type_name: "Foo".into(),
            field: "z".into(),
        };
        assert!(!err.is_validation_failure());
        assert_eq!(err.field(), Some("z"));
        assert_eq!(err.to_string(), "z is not a member of Foo");

        let err = DataError::IndexOutOfRange { index: 4, len: 3 };
        assert_eq!(err.field(), None);
    }
}
