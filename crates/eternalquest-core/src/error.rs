//! Core error types for eternalquest-core.
//!
//! Every failure the engine can report is recoverable: the caller is told
//! what went wrong and the session is left exactly as it was before the call.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for eternalquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Goal creation input was rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Event recorded against a goal that does not exist
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Save file is missing
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Save file is malformed
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors raised while creating a goal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required numeric field was not supplied
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// Field is present but not a non-negative integer
    #[error("Invalid value for '{field}': '{value}' is not a non-negative integer")]
    NotANumber { field: String, value: String },

    /// Field parsed but violates a constraint
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Goal variant name is not recognized
    #[error("Unknown goal type: {0}")]
    UnknownVariant(String),
}

/// Index errors raised when looking up a goal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Goal index outside `[0, len)`
    #[error("Goal index {index} out of range (goal count: {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Raised when a save file cannot be found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Save file not found: {}", path.display())]
pub struct NotFoundError {
    pub path: PathBuf,
}

/// Raised when a persisted session cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// File ended before all header lines were read
    #[error("Expected at least {expected} header lines, found {found}")]
    TruncatedHeader { expected: usize, found: usize },

    /// A line could not be parsed
    #[error("Line {line}: {message}")]
    InvalidLine { line: usize, message: String },
}

impl FormatError {
    pub(crate) fn at(line: usize, message: impl Into<String>) -> Self {
        FormatError::InvalidLine {
            line,
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Data directory could not be determined or created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
