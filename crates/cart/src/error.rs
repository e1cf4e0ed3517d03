//! Error types for storage and snapshot persistence.
//!
//! None of these reach cart callers by default: the store logs them and keeps
//! running in memory. They exist so the failure is still observable.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on slot {slot}: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    /// The write would exceed the store's byte quota.
    #[error("quota exceeded writing slot {slot}: {required} bytes needed, {limit} allowed")]
    QuotaExceeded {
        slot: String,
        required: usize,
        limit: usize,
    },

    /// The store cannot be used at all (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while reading or writing a JSON snapshot slot.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored text is not valid JSON or does not match the record shape.
    #[error("Corrupt snapshot in {slot}: {source}")]
    Decode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    /// The stored JSON is valid but is not an array.
    #[error("Snapshot in {slot} is not a list")]
    NotAList { slot: String },

    /// The snapshot could not be serialized.
    #[error("Failed to encode snapshot for {slot}: {source}")]
    Encode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_display() {
        let err = StorageError::QuotaExceeded {
            slot: "planto:cart:v1".to_string(),
            required: 120,
            limit: 64,
        };
        assert_eq!(
            err.to_string(),
            "quota exceeded writing slot planto:cart:v1: 120 bytes needed, 64 allowed"
        );
    }

    #[test]
    fn test_persist_error_wraps_storage_error() {
        let err = PersistError::from(StorageError::Unavailable("lock poisoned".to_string()));
        assert!(matches!(err, PersistError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: storage unavailable: lock poisoned");
    }
}
