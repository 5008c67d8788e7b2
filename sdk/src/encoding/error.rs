//! Encoding error types.
//!
//! Provides the error type returned while flattening option values into
//! request parameters.

use std::fmt::Display;

/// Parameter encoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A list encoder was given an absent value.
    #[error("encode err: value must not be nil")]
    NilValue,

    /// A list encoder was given something that is not a sequence.
    #[error("encode err: value must be a sequence, got {0}")]
    NotSequence(&'static str),

    /// A map encoder was given something that is not a map.
    #[error("encode err: value must be a map, got {0}")]
    NotMap(&'static str),

    /// The top-level value is not a struct or a map.
    #[error("encode err: value must be a struct or a map, got {0}")]
    NotStruct(&'static str),

    /// A field holds a shape the flat encoder cannot express.
    #[error("encode err: field {field:?} has unsupported type {kind}")]
    UnsupportedField {
        /// Wire name of the offending field.
        field: String,
        /// Kind of value found in the field.
        kind: &'static str,
    },

    /// A map key is neither a string nor an integer.
    #[error("encode err: map key must be a string or an integer, got {0}")]
    UnsupportedKey(&'static str),

    /// Error raised by a `Serialize` implementation.
    #[error("encode err: {0}")]
    Custom(String),
}

impl EncodeError {
    /// Returns true when the caller handed a list or map encoder the wrong
    /// kind of value, as opposed to a structural failure inside a value.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::NilValue | Self::NotSequence(_) | Self::NotMap(_))
    }
}

impl serde::ser::Error for EncodeError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EncodeError::UnsupportedField {
            field: "caps".to_string(),
            kind: "struct",
        };
        assert_eq!(
            err.to_string(),
            "encode err: field \"caps\" has unsupported type struct"
        );
        assert_eq!(
            EncodeError::NilValue.to_string(),
            "encode err: value must not be nil"
        );
    }

    #[test]
    fn test_error_caller_classification() {
        assert!(EncodeError::NilValue.is_caller_error());
        assert!(EncodeError::NotSequence("i64").is_caller_error());
        assert!(EncodeError::NotMap("str").is_caller_error());
        assert!(!EncodeError::NotStruct("seq").is_caller_error());
        assert!(!EncodeError::Custom("boom".to_string()).is_caller_error());
    }
}
