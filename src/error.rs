//! Error types

use thiserror::Error;

/// Errors from the conversion entry points
#[derive(Debug, Error)]
pub enum MappingError {
    /// Input could not be read as a finite number
    #[error("Invalid number")]
    InvalidNumber(String),
}

/// Errors from preference updates
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The partial update was not a JSON object
    #[error("preferences must be a JSON object")]
    NotAnObject,

    /// The merged record no longer has the preference shape
    #[error("invalid preferences: {0}")]
    InvalidPreferences(#[from] serde_json::Error),
}

/// Errors from a preference storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}
