//! Core error types for focusdeck-core.
//!
//! The reducer and the persistence gateway are total and never return these;
//! they surface from the fallible edges instead: opening a storage slot,
//! loading configuration, and validating collaborator input before dispatch.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage slot errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a durable state slot.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Reading the slot failed
    #[error("Failed to read slot '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Writing the slot failed
    #[error("Failed to write slot '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Any other SQLite failure
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Rejections raised at the collaborator boundary, before dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Block end must come after its start
    #[error("Invalid time range: end ({end}) must be later than start ({start})")]
    InvalidTimeRange { start: String, end: String },

    /// Required text is empty after trimming
    #[error("'{0}' must not be empty")]
    EmptyField(String),

    /// Timer values must be positive
    #[error("'{0}' must be a positive number")]
    NonPositive(String),

    /// Value above the accepted ceiling
    #[error("'{field}' must be at most {max}")]
    TooLong { field: String, max: u32 },

    /// Unparseable or out-of-domain value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg)
                if inner.code == rusqlite::ErrorCode::DatabaseBusy
                    || inner.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_into_core_error() {
        let err: CoreError = ValidationError::EmptyField("title".into()).into();
        assert_eq!(err.to_string(), "Validation error: 'title' must not be empty");
    }

    #[test]
    fn sqlite_failures_map_to_query_failed() {
        let err: StorageError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, StorageError::QueryFailed(_)));
    }
}
