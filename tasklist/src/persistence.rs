//! Saving and restoring the list.
//!
//! The list lives in one storage slot as a JSON array of
//! `{id, name, completed}` objects. Loading fails open: a missing slot, an
//! unreadable slot or malformed JSON all yield an empty list.

use crate::types::TodoList;
use tasklist_core::storage::{Storage, StorageError};

/// Slot the list is saved under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Serialize a list into the slot format.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if encoding fails.
pub fn encode(todos: &TodoList) -> Result<String, StorageError> {
    serde_json::to_string(todos).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse the slot format.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if `raw` is not a JSON array of items.
pub fn decode(raw: &str) -> Result<TodoList, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Read the list from `storage`, substituting an empty list on any failure.
#[tracing::instrument(skip(storage))]
pub async fn load(storage: &dyn Storage, key: &str) -> TodoList {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No saved list, starting empty");
            return TodoList::new();
        },
        Err(error) => {
            tracing::warn!(%error, "Could not read saved list, starting empty");
            return TodoList::new();
        },
    };

    match decode(&raw) {
        Ok(todos) => {
            tracing::info!(count = todos.len(), "Loaded saved list");
            todos
        },
        Err(error) => {
            tracing::warn!(%error, "Saved list is malformed, starting empty");
            TodoList::new()
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{TodoId, TodoItem};
    use tasklist_testing::{FailingStorage, InMemoryStorage};

    fn sample() -> TodoList {
        TodoList::from(vec![
            TodoItem {
                id: TodoId::new(1),
                name: "Mua sữa".to_string(),
                completed: true,
            },
            TodoItem::new(TodoId::new(2), "Walk the dog".to_string()),
        ])
    }

    #[tokio::test]
    async fn load_reads_what_was_saved() {
        let storage = InMemoryStorage::new();
        storage
            .set(DEFAULT_STORAGE_KEY, encode(&sample()).unwrap())
            .await
            .unwrap();

        assert_eq!(load(&storage, DEFAULT_STORAGE_KEY).await, sample());
    }

    #[tokio::test]
    async fn load_accepts_timestamp_ids() {
        let storage = InMemoryStorage::with_slot(
            "todos",
            r#"[{"id":1718000000123,"name":"Học Rust","completed":false}]"#,
        );

        let todos = load(&storage, "todos").await;

        assert_eq!(todos.max_id(), Some(TodoId::new(1_718_000_000_123)));
    }

    #[tokio::test]
    async fn load_fails_open() {
        let cases = [
            InMemoryStorage::new(),
            InMemoryStorage::with_slot("todos", "not json"),
            InMemoryStorage::with_slot("todos", "null"),
            InMemoryStorage::with_slot("todos", r#"{"id":1}"#),
            InMemoryStorage::with_slot("todos", r#"[{"id":1,"name":"no flag"}]"#),
        ];

        for storage in cases {
            assert!(load(&storage, "todos").await.is_empty());
        }

        assert!(load(&FailingStorage::default(), "todos").await.is_empty());
    }

    #[test]
    fn decode_rejects_negative_ids() {
        let result = decode(r#"[{"id":-1,"name":"x","completed":false}]"#);
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
