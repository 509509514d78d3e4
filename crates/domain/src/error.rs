//! Domain error types.

use kv_store::KvStoreError;
use thiserror::Error;

/// Errors that can escape a cart mutation.
///
/// Everything recoverable (corrupt persisted data, unknown product ids,
/// out-of-range quantities) is handled in place; only a failing write to the
/// backing store propagates.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The backing store rejected a read or write.
    #[error("storage error: {0}")]
    Store(#[from] KvStoreError),

    /// The cart could not be serialized for persistence.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
