//! Error types for configuration building.
//!
//! Every variant is a caller-input validation failure; construction aborts on
//! the first one and nothing is returned.

use thiserror::Error;

/// Main error type for configuration building.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Too few leading arguments, or too few tail elements for the active flags.
    #[error("Arity error: {context} requires {expected} argument(s), got {actual}")]
    Arity {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A field has the wrong kind of value.
    #[error("Type error: {field} must be {expected}, got {actual}")]
    Type {
        field: String,
        expected: String,
        actual: String,
    },

    /// Transform name is not one of the supported models.
    #[error("Unknown transform: {0:?} (expected translation, euclidean, affine or homography)")]
    UnknownTransform(String),

    /// Matrix shape does not match the shape required for the field.
    #[error("Shape mismatch: {field} must be {}, got {}", format_shape(.expected), format_shape(.actual))]
    ShapeMismatch {
        field: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Initialization method is neither LS nor RANSAC.
    #[error("Unknown initialization method: {0:?} (expected LS or RANSAC)")]
    UnknownInitMethod(String),

    /// A scalar has the right type but an unusable value.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration building.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn format_shape(dims: &[usize]) -> String {
    dims.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("x")
}

impl ConfigError {
    /// Create an arity error.
    pub fn arity(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::Arity {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create a type error.
    pub fn type_error(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Type {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an unknown transform error.
    pub fn unknown_transform(name: impl Into<String>) -> Self {
        Self::UnknownTransform(name.into())
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(field: impl Into<String>, expected: Vec<usize>, actual: Vec<usize>) -> Self {
        Self::ShapeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Create an unknown initialization method error.
    pub fn unknown_init_method(method: impl Into<String>) -> Self {
        Self::UnknownInitMethod(method.into())
    }

    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
