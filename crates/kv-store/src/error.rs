use thiserror::Error;

/// Errors that can occur when reading or writing the backing store.
#[derive(Debug, Error)]
pub enum KvStoreError {
    /// The backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store's own on-disk envelope could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, KvStoreError>;
