//! Core error types for pomo-core.
//!
//! Configuration problems are split by how the caller is expected to react:
//! parse and read failures are recovered from by falling back to defaults,
//! validation and format errors abort the command that triggered them.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// User input that could not be understood
    #[error(transparent)]
    InvalidFormat(#[from] InvalidFormatError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read
    #[error("Failed to read configuration from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a timer configuration
    #[error("Failed to parse configuration at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration values break the positivity invariant
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: &str) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// A duration or count argument that is not a positive value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid format '{input}': {expected}")]
pub struct InvalidFormatError {
    pub input: String,
    pub expected: &'static str,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
