//! In-memory storage testing utilities
//!
//! Provides fast, deterministic storage backends:
//! - [`InMemoryStorage`]: HashMap-based slot storage with a write log
//! - [`FailingStorage`]: every operation fails, for error-path tests

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tasklist_core::storage::{validate_key, Storage, StorageError, StorageFuture};

/// In-memory slot storage for fast, deterministic testing.
///
/// Cloning yields another handle to the same slots, so a test can keep one
/// handle while the environment owns another.
///
/// # Example
///
/// ```
/// use tasklist_testing::InMemoryStorage;
/// use tasklist_core::storage::Storage;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = InMemoryStorage::new();
///
/// storage.set("todos", "[]".to_string()).await?;
///
/// assert_eq!(storage.get("todos").await?.as_deref(), Some("[]"));
/// assert_eq!(storage.write_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
    writes: Arc<RwLock<Vec<String>>>,
}

impl InMemoryStorage {
    /// Create a new empty in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with one slot pre-populated
    #[must_use]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .slots
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Current raw value of a slot, without going through the async API
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.slots.read().unwrap().get(key).cloned()
    }

    /// Number of `set` calls so far
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.read().unwrap().len()
    }

    /// Keys written by `set`, in call order (repeats included)
    #[must_use]
    pub fn write_log(&self) -> Vec<String> {
        self.writes.read().unwrap().clone()
    }

    /// Check if no slot holds a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.read().unwrap().is_empty()
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> StorageFuture<'_, Option<String>> {
        let key = key.to_string();
        Box::pin(async move {
            validate_key(&key)?;
            Ok(self.slots.read().unwrap().get(&key).cloned())
        })
    }

    fn set(&self, key: &str, value: String) -> StorageFuture<'_, ()> {
        let key = key.to_string();
        Box::pin(async move {
            validate_key(&key)?;
            self.writes.write().unwrap().push(key.clone());
            self.slots.write().unwrap().insert(key, value);
            Ok(())
        })
    }
}

/// Storage whose every operation fails with an I/O error.
#[derive(Clone, Debug)]
pub struct FailingStorage {
    message: String,
}

impl FailingStorage {
    /// Fail with the given error message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> StorageError {
        StorageError::Io(std::io::Error::other(self.message.clone()))
    }
}

impl Default for FailingStorage {
    fn default() -> Self {
        Self::new("storage unavailable")
    }
}

impl Storage for FailingStorage {
    fn get(&self, _key: &str) -> StorageFuture<'_, Option<String>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn set(&self, _key: &str, _value: String) -> StorageFuture<'_, ()> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }
}
