use thiserror::Error;

use carenav_core::error::CoreError;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The stored record is not the one the caller loaded: it was created,
    /// replaced or deleted by someone else in between.
    #[error("checklist record changed since it was loaded: {key}")]
    PreconditionFailed { key: String },

    #[error("record encoding error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("S3 {operation} failed for {key}: {message}")]
    S3 {
        operation: &'static str,
        key: String,
        message: String,
    },
}

impl StorageError {
    pub(crate) fn s3(operation: &'static str, key: &str, err: impl std::fmt::Display) -> Self {
        StorageError::S3 {
            operation,
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}
