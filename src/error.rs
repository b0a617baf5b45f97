//! Error types for document rendering.
//!
//! A render either produces a complete document or fails with exactly one
//! of these errors. Empty or missing data is never an error; it is rendered
//! as a placeholder instead.

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record field could not be turned into display text
    #[error("Malformed input in '{field}': {reason}")]
    MalformedInput {
        /// Field (or column) that was rejected
        field: String,
        /// Reason for rejection
        reason: String,
    },

    /// A table column carries a weight that cannot be normalized
    #[error("Invalid weight {weight} for column '{column}': weights must be finite and > 0")]
    InvalidColumn {
        /// Column label
        column: String,
        /// Offending weight
        weight: f32,
    },

    /// Render configuration leaves no usable drawing area
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::MalformedInput`].
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
