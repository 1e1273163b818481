//! Key-value storage slots.
//!
//! The application persists its whole state into one named slot, the way a
//! browser page would use `localStorage`: a string key mapping to a string
//! value that is overwritten wholesale on every write.
//!
//! # Implementations
//!
//! - `FileStorage` (in the `tasklist` crate): one file per slot on disk
//! - `InMemoryStorage` (in `tasklist-testing`): `HashMap`-backed, for tests
//!
//! # Example
//!
//! ```no_run
//! use tasklist_core::storage::{Storage, StorageError};
//!
//! async fn example<S: Storage>(storage: &S) -> Result<(), StorageError> {
//!     storage.set("todos", "[]".to_string()).await?;
//!     let raw = storage.get("todos").await?;
//!     assert_eq!(raw.as_deref(), Some("[]"));
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`Storage`] operations
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The slot key is empty or contains characters outside `[A-Za-z0-9._-]`.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Flat key-value storage.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// so that environments can hold an `Arc<dyn Storage>` and reducers can capture
/// it inside effects.
pub trait Storage: Send + Sync {
    /// Read a slot.
    ///
    /// Returns `None` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the read fails.
    fn get(&self, key: &str) -> StorageFuture<'_, Option<String>>;

    /// Overwrite a slot with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the write fails.
    fn set(&self, key: &str, value: String) -> StorageFuture<'_, ()>;
}

/// Check that `key` can name a slot on every backend.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for empty keys, `.`/`..`, and keys
/// with characters outside `[A-Za-z0-9._-]`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
