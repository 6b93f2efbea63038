//! # Generation Errors
//!
//! Error types for mesh generation. Two broad classes exist: validation
//! errors caused by the caller (bad parameters) and internal errors that
//! indicate a bug in an operator or the engine. Malformed faces dropped
//! during flag materialization are deliberately *not* errors; see
//! [`crate::flag`].

use conway_notation::NotationError;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConwayError>;

/// Errors that can occur during mesh generation.
#[derive(Debug, Error)]
pub enum ConwayError {
    /// Notation parse error from the earlier stage.
    #[error("Notation error: {0}")]
    Notation(#[from] NotationError),

    /// A parameter outside its declared range.
    #[error("Invalid parameter for '{op}': {message}")]
    InvalidParameter { op: String, message: String },

    /// A structural invariant was violated; indicates a bug, not bad input.
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// An operator stage failed; wraps the underlying cause.
    #[error("Operator '{op}' failed: {source}")]
    Operator {
        op: String,
        #[source]
        source: Box<ConwayError>,
    },

    /// A base-generation stage failed; wraps the underlying cause.
    #[error("Base '{base}' failed: {source}")]
    Base {
        base: String,
        #[source]
        source: Box<ConwayError>,
    },

    /// I/O failure while exporting.
    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ConwayError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(op: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            op: op.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Wraps an error with the identifier of the operator stage that failed.
    pub fn in_operator(op: impl Into<String>, source: ConwayError) -> Self {
        Self::Operator {
            op: op.into(),
            source: Box::new(source),
        }
    }

    /// Wraps an error with the identifier of the base stage that failed.
    pub fn in_base(base: impl Into<String>, source: ConwayError) -> Self {
        Self::Base {
            base: base.into(),
            source: Box::new(source),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConwayError::invalid_parameter("k", "side count out of range");
        assert!(err.to_string().contains("Invalid parameter"));
        assert!(err.to_string().contains("'k'"));
    }

    #[test]
    fn test_operator_wrapping_preserves_cause() {
        let cause = ConwayError::internal("face index out of range");
        let err = ConwayError::in_operator("g", cause);
        let text = err.to_string();
        assert!(text.contains("'g'"));
        assert!(text.contains("face index out of range"));
    }
}
