//! Error types for bitrate-core.
//!
//! Only the record-to-sample boundary can fail. Segmentation is total over any
//! finite input, so it has no error type of its own.

/// Result type alias using [`DecodeError`].
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Failure to turn an external frame record into a [`Sample`](crate::Sample).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The size field is not a non-negative decimal integer.
    #[error("malformed size: {value:?}")]
    MalformedSize { value: String },

    /// A required field is absent from the record.
    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    /// The picture type token is not one of `I`, `B` or `P`.
    #[error("unknown picture type: {token:?}")]
    UnknownType { token: String },

    /// The duration field is negative.
    #[error("negative duration: {value}")]
    NegativeDuration { value: i64 },
}

impl DecodeError {
    /// Create a malformed size error.
    pub fn malformed_size(value: impl Into<String>) -> Self {
        Self::MalformedSize {
            value: value.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an unknown picture type error.
    pub fn unknown_type(token: impl Into<String>) -> Self {
        Self::UnknownType {
            token: token.into(),
        }
    }
}
