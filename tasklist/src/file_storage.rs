//! Slot storage backed by files in a directory.
//!
//! Slot `key` lives at `<dir>/<key>.json`. Writes go to a temporary sibling
//! first and are renamed into place, so a crash mid-write leaves the previous
//! value intact.

use std::io::ErrorKind;
use std::path::PathBuf;
use tasklist_core::storage::{validate_key, Storage, StorageFuture};

/// File-per-slot storage rooted at a directory
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding slot `key`
    #[must_use]
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageFuture<'_, Option<String>> {
        let key = key.to_string();
        Box::pin(async move {
            validate_key(&key)?;
            match tokio::fs::read_to_string(self.slot_path(&key)).await {
                Ok(raw) => Ok(Some(raw)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn set(&self, key: &str, value: String) -> StorageFuture<'_, ()> {
        let key = key.to_string();
        Box::pin(async move {
            validate_key(&key)?;
            tokio::fs::create_dir_all(&self.dir).await?;

            let path = self.slot_path(&key);
            let tmp = self.dir.join(format!("{key}.json.tmp"));
            tokio::fs::write(&tmp, value).await?;
            tokio::fs::rename(&tmp, &path).await?;

            tracing::trace!(path = %path.display(), "Slot written");
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tasklist_core::storage::StorageError;

    #[tokio::test]
    async fn round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("todos").await.unwrap(), None);

        storage.set("todos", "[]".to_string()).await.unwrap();
        storage.set("todos", "[1]".to_string()).await.unwrap();

        assert_eq!(storage.get("todos").await.unwrap().as_deref(), Some("[1]"));
        assert!(storage.slot_path("todos").exists());
        assert!(!dir.path().join("nested/todos.json.tmp").exists());
    }

    #[tokio::test]
    async fn unreadable_slot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        std::fs::create_dir(storage.slot_path("todos")).unwrap();

        let result = storage.get("todos").await;

        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[tokio::test]
    async fn keys_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let result = storage.set("../outside", "x".to_string()).await;

        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
