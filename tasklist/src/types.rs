//! Domain types for the to-do list.
//!
//! A list is an ordered collection of items; insertion order is display
//! order and ids are unique within a list.

use serde::{Deserialize, Serialize};
use tasklist_macros::Action;

/// Unique identifier for a todo item
///
/// Serialized as a bare JSON number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Wrap a raw id
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier, fixed at creation
    pub id: TodoId,
    /// Display text
    pub name: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed, todo item
    #[must_use]
    pub const fn new(id: TodoId, name: String) -> Self {
        Self {
            id,
            name,
            completed: false,
        }
    }
}

/// Ordered collection of todo items
///
/// Serializes as a plain JSON array of items. Building a list from items
/// (including deserialization) keeps the first item for each id and drops
/// later duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TodoItem>", into = "Vec<TodoItem>")]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.items.iter()
    }

    /// Items as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[TodoItem] {
        &self.items
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the item at a 1-based display position
    #[must_use]
    pub fn at_position(&self, position: usize) -> Option<&TodoItem> {
        position.checked_sub(1).and_then(|index| self.items.get(index))
    }

    /// Number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Whether the list is non-empty and every item is completed
    #[must_use]
    pub fn all_completed(&self) -> bool {
        !self.is_empty() && self.completed_count() == self.len()
    }

    /// Largest id in the list
    #[must_use]
    pub fn max_id(&self) -> Option<TodoId> {
        self.items.iter().map(|item| item.id).max()
    }

    /// Appends an item; returns false (and leaves the list alone) if its id is taken
    pub fn push(&mut self, item: TodoItem) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes the item with `id`; returns whether one was removed
    pub fn remove(&mut self, id: TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Flips `completed` on the item with `id`; returns whether one matched
    pub fn toggle(&mut self, id: TodoId) -> bool {
        self.update(id, |item| item.completed = !item.completed)
    }

    /// Replaces the name of the item with `id`; returns whether one matched
    pub fn rename(&mut self, id: TodoId, name: String) -> bool {
        self.update(id, |item| item.name = name)
    }

    fn update(&mut self, id: TodoId, f: impl FnOnce(&mut TodoItem)) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                f(item);
                true
            },
            None => false,
        }
    }
}

impl From<Vec<TodoItem>> for TodoList {
    fn from(items: Vec<TodoItem>) -> Self {
        let mut list = Self::new();
        for item in items {
            let id = item.id;
            if !list.push(item) {
                tracing::warn!(%id, "Dropping todo with duplicate id");
            }
        }
        list
    }
}

impl From<TodoList> for Vec<TodoItem> {
    fn from(list: TodoList) -> Self {
        list.items
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// State of the todo store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// The list being edited
    pub todos: TodoList,
    /// Message of the most recent failed save, cleared by the next successful one
    pub persist_error: Option<String>,
}

impl TodoState {
    /// State holding a rehydrated list
    #[must_use]
    pub const fn with_todos(todos: TodoList) -> Self {
        Self {
            todos,
            persist_error: None,
        }
    }
}

/// Actions for the todo store
///
/// Commands come from user gestures. Events are produced by the persistence
/// effect and fed back into the store.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: append a new item
    ///
    /// The caller trims and rejects empty names before sending.
    #[command]
    Add {
        /// Name of the new item
        name: String,
    },

    /// Command: remove an item (unknown ids are ignored)
    #[command]
    Delete {
        /// Item to remove
        id: TodoId,
    },

    /// Command: flip an item's completed flag (unknown ids are ignored)
    #[command]
    Toggle {
        /// Item to toggle
        id: TodoId,
    },

    /// Command: rename an item (unknown ids are ignored, any name is accepted)
    #[command]
    Update {
        /// Item to rename
        id: TodoId,
        /// New name
        name: String,
    },

    // ========== Events ==========
    /// Event: the list was written to storage
    #[event]
    Persisted {
        /// Number of items written
        count: usize,
    },

    /// Event: writing the list failed
    #[event]
    PersistFailed {
        /// Error message
        error: String,
    },
}
