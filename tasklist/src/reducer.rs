//! Reducer logic for the todo list.
//!
//! Each command makes one linear pass over the list and then schedules a
//! save of the whole list. Commands aimed at unknown ids change nothing but
//! are still saved, so the slot always mirrors the list after every command.

use crate::persistence;
use crate::types::{TodoAction, TodoId, TodoItem, TodoList, TodoState};
use std::sync::Arc;
use tasklist_core::{
    effect::Effect, environment::IdGenerator, reducer::Reducer, smallvec, storage::Storage,
    SmallVec,
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new items
    pub ids: Arc<dyn IdGenerator>,
    /// Where the list is saved
    pub storage: Arc<dyn Storage>,
    /// Slot the list is saved under
    pub storage_key: String,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(
        ids: Arc<dyn IdGenerator>,
        storage: Arc<dyn Storage>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            ids,
            storage,
            storage_key: storage_key.into(),
        }
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Pure form of the reducer: the state after `action`, effects discarded
    #[must_use]
    pub fn apply(&self, state: &TodoState, action: TodoAction, env: &TodoEnvironment) -> TodoState {
        let mut next = state.clone();
        let _ = self.reduce(&mut next, action, env);
        next
    }

    /// Picks an id for a new item
    ///
    /// When the generator hands out an id that is already taken, falls back
    /// to one past the largest id in the list, or to the smallest free id if
    /// that overflows or is taken as well.
    fn fresh_id(todos: &TodoList, env: &TodoEnvironment) -> TodoId {
        let candidate = TodoId::new(env.ids.next_id());
        if !todos.contains(candidate) {
            return candidate;
        }

        let fallback = todos
            .max_id()
            .and_then(|max| max.get().checked_add(1))
            .map(TodoId::new)
            .filter(|id| !todos.contains(*id))
            .unwrap_or_else(|| Self::lowest_free_id(todos));
        tracing::warn!(%candidate, %fallback, "Generated id already in use");
        fallback
    }

    /// Smallest id not used by any item
    fn lowest_free_id(todos: &TodoList) -> TodoId {
        let mut ids: Vec<u64> = todos.iter().map(|t| t.id.get()).collect();
        ids.sort_unstable();

        let mut free = 0;
        for id in ids {
            if id != free {
                break;
            }
            free = free.saturating_add(1);
        }
        TodoId::new(free)
    }

    /// Effect that writes the whole list to the storage slot
    fn persist(todos: &TodoList, env: &TodoEnvironment) -> Effect<TodoAction> {
        let count = todos.len();
        let json = match persistence::encode(todos) {
            Ok(json) => json,
            Err(error) => {
                let error = error.to_string();
                return Effect::future(async move { Some(TodoAction::PersistFailed { error }) });
            },
        };

        let storage = Arc::clone(&env.storage);
        let key = env.storage_key.clone();

        Effect::future(async move {
            match storage.set(&key, json).await {
                Ok(()) => Some(TodoAction::Persisted { count }),
                Err(error) => Some(TodoAction::PersistFailed {
                    error: error.to_string(),
                }),
            }
        })
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.kind(), "Reducing");

        match action {
            // ========== Commands ==========
            TodoAction::Add { name } => {
                let id = Self::fresh_id(&state.todos, env);
                let added = state.todos.push(TodoItem::new(id, name));
                debug_assert!(added, "fresh id {id} collided");
                if added {
                    tracing::debug!(%id, "Todo added");
                } else {
                    tracing::warn!(%id, "Add dropped, id collided");
                }
            },

            TodoAction::Delete { id } => {
                if !state.todos.remove(id) {
                    tracing::debug!(%id, "Delete ignored, no such todo");
                }
            },

            TodoAction::Toggle { id } => {
                if !state.todos.toggle(id) {
                    tracing::debug!(%id, "Toggle ignored, no such todo");
                }
            },

            TodoAction::Update { id, name } => {
                if !state.todos.rename(id, name) {
                    tracing::debug!(%id, "Update ignored, no such todo");
                }
            },

            // ========== Events ==========
            TodoAction::Persisted { count } => {
                tracing::trace!(count, "Todo list saved");
                state.persist_error = None;
                return SmallVec::new();
            },

            TodoAction::PersistFailed { error } => {
                tracing::warn!(%error, "Failed to save todo list");
                state.persist_error = Some(error);
                return SmallVec::new();
            },
        }

        smallvec![Self::persist(&state.todos, env)]
    }
}
