//! Storage error types
//!
//! Errors raised by the durable key-value stores.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing persisted values
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation on the backing file failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing file exists but is not a valid key-value document
    #[error("Corrupt storage file {path:?}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Serializing the map back to disk failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Mutex guarding the store was poisoned by a panicking writer
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::Corrupt {
            path: PathBuf::from("/tmp/store.json"),
            reason: "expected object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Corrupt storage file \"/tmp/store.json\": expected object"
        );

        let err = StorageError::Lock("poisoned".to_string());
        assert_eq!(err.to_string(), "Lock error: poisoned");
    }
}
