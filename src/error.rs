//! Error handling for humo-suppress
//!
//! Shape, key and format errors are terminal for the current invocation and
//! are returned to the caller unmodified.

use thiserror::Error;

/// Result type alias for humo-suppress operations
pub type Result<T> = std::result::Result<T, SuppressError>;

/// Main error type for humo-suppress operations
#[derive(Error, Debug)]
pub enum SuppressError {
    // Contract Errors
    #[error("Shape error: expected {expected}, got {actual:?}")]
    Shape { expected: String, actual: Vec<usize> },

    #[error("Missing key '{key}' in image embeds")]
    MissingKey { key: String },

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    #[error("Tensor '{key}' contains NaN or infinite values")]
    NonFinite { key: String },

    // Configuration Errors
    #[error("Invalid parameter: {param} = {value} (expected {expected})")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SuppressError {
    /// Build a shape error for an embedding that is not `[T, 5, C]`
    pub(crate) fn embedding_shape(actual: &[usize]) -> Self {
        SuppressError::Shape {
            expected: format!("[T, {}, C]", crate::edit::NUM_BANDS),
            actual: actual.to_vec(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SuppressError::Shape { .. } => "SHAPE_ERROR",
            SuppressError::MissingKey { .. } => "MISSING_KEY",
            SuppressError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            SuppressError::NonFinite { .. } => "NON_FINITE",
            SuppressError::InvalidParameter { .. } => "INVALID_PARAMETER",
            SuppressError::Io(_) => "IO_ERROR",
            SuppressError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            SuppressError::Shape { .. } => "Pass a [T, 5, C] audio embedding tensor",
            SuppressError::MissingKey { .. } => {
                "Connect image embeds produced by a HuMo embedding node"
            }
            SuppressError::UnsupportedFormat { .. } => {
                "Pass a flat sample list, a (sample_rate, samples) pair or a numeric array"
            }
            SuppressError::NonFinite { .. } => "Lower the gains or enable clamping",
            SuppressError::InvalidParameter { .. } => {
                "Adjust the parameter to be within valid range"
            }
            _ => "Check the error details and try again",
        }
    }
}
