//! Key-value persistence adapter for the storefront cart.
//!
//! The cart serializes to a single record under a fixed key; this crate
//! provides the storage seam so the backend can be swapped (in-memory for
//! tests, a file on disk for an embedding host).

pub mod error;
pub mod file;
pub mod memory;

pub use error::{KvStoreError, Result};
pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

/// Storage surface the cart persists through.
///
/// Handles have shared semantics: clones observe each other's writes, and all
/// methods take `&self`.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any existing value.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`. Removing an absent key is not an
    /// error.
    fn delete(&self, key: &str) -> Result<()>;
}
