//! The list screen: input validation, dialogs, and rendering over a store.
//!
//! [`Shell`] owns the presentation state that never reaches the store (the
//! validation flag and the open dialog) and turns user gestures into
//! [`TodoAction`]s. Items are addressed by their 1-based position on screen.

pub mod dialog;
pub mod messages;
pub mod view;

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoItem, TodoState};
use dialog::Dialog;
use tasklist_runtime::{Store, StoreError};
use view::View;

/// Store specialized to the todo list
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Errors from shell gestures
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// No item sits at the given position
    #[error("no item at position {0}")]
    NoSuchItem(usize),

    /// A dialog is already open
    #[error("a dialog is already open")]
    DialogOpen,

    /// The gesture needs an open dialog of the matching kind
    #[error("no matching dialog is open")]
    NoDialog,

    /// The store rejected the action
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Presenter for the list screen
pub struct Shell {
    store: TodoStore,
    show_error: bool,
    dialog: Dialog,
}

impl Shell {
    /// Shell over `store`, with no dialog open
    #[must_use]
    pub fn new(store: TodoStore) -> Self {
        Self {
            store,
            show_error: false,
            dialog: Dialog::Closed,
        }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Whether the name-required message is showing
    #[must_use]
    pub const fn show_error(&self) -> bool {
        self.show_error
    }

    /// The open dialog, if any
    #[must_use]
    pub const fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Submit the input box
    ///
    /// Blank input raises the name-required message and sends nothing.
    /// Otherwise the trimmed name is added and the message is cleared.
    ///
    /// Returns whether an item was added.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Store`] if the store fails to process the add.
    pub async fn submit(&mut self, input: &str) -> Result<bool, ShellError> {
        let name = input.trim();
        if name.is_empty() {
            self.show_error = true;
            return Ok(false);
        }

        self.show_error = false;
        self.store
            .send(TodoAction::Add {
                name: name.to_string(),
            })
            .await?;
        Ok(true)
    }

    /// Flip the completed flag of the item at `position`
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::NoSuchItem`] for an empty position, or
    /// [`ShellError::Store`] if the store fails.
    pub async fn toggle(&mut self, position: usize) -> Result<(), ShellError> {
        let item = self.item_at(position).await?;
        self.store.send(TodoAction::Toggle { id: item.id }).await?;
        Ok(())
    }

    /// Open the edit dialog for the item at `position`, pre-filled with its name
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::DialogOpen`] while another dialog is showing, or
    /// [`ShellError::NoSuchItem`] for an empty position.
    pub async fn open_edit(&mut self, position: usize) -> Result<(), ShellError> {
        self.ensure_no_dialog()?;
        let item = self.item_at(position).await?;
        tracing::debug!(id = %item.id, "Opening edit dialog");
        self.dialog = Dialog::Editing {
            id: item.id,
            draft: item.name,
        };
        Ok(())
    }

    /// Open the delete confirmation for the item at `position`
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::DialogOpen`] while another dialog is showing, or
    /// [`ShellError::NoSuchItem`] for an empty position.
    pub async fn open_delete(&mut self, position: usize) -> Result<(), ShellError> {
        self.ensure_no_dialog()?;
        let item = self.item_at(position).await?;
        tracing::debug!(id = %item.id, "Opening delete dialog");
        self.dialog = Dialog::ConfirmingDelete { id: item.id };
        Ok(())
    }

    /// Confirm the edit dialog, renaming its item to `name` as typed
    ///
    /// The name is not trimmed or validated; an empty name is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::NoDialog`] unless the edit dialog is open, or
    /// [`ShellError::Store`] if the store fails. The dialog closes either way.
    pub async fn confirm_edit(&mut self, name: &str) -> Result<(), ShellError> {
        let Dialog::Editing { id, .. } = self.dialog else {
            return Err(ShellError::NoDialog);
        };
        self.dialog.close();
        self.store
            .send(TodoAction::Update {
                id,
                name: name.to_string(),
            })
            .await?;
        Ok(())
    }

    /// Confirm the delete dialog, removing its item
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::NoDialog`] unless the delete dialog is open, or
    /// [`ShellError::Store`] if the store fails. The dialog closes either way.
    pub async fn confirm_delete(&mut self) -> Result<(), ShellError> {
        let Dialog::ConfirmingDelete { id } = self.dialog else {
            return Err(ShellError::NoDialog);
        };
        self.dialog.close();
        self.store.send(TodoAction::Delete { id }).await?;
        Ok(())
    }

    /// Cancel whichever dialog is open; returns whether one was
    pub fn close_dialog(&mut self) -> bool {
        self.dialog.close().is_visible()
    }

    /// Render the current screen
    pub async fn render(&self, ansi: bool) -> String {
        self.store
            .state(|state| {
                View::new(state, &self.dialog, self.show_error)
                    .with_ansi(ansi)
                    .to_string()
            })
            .await
    }

    fn ensure_no_dialog(&self) -> Result<(), ShellError> {
        if self.dialog.is_visible() {
            Err(ShellError::DialogOpen)
        } else {
            Ok(())
        }
    }

    async fn item_at(&self, position: usize) -> Result<TodoItem, ShellError> {
        self.store
            .state(|state| state.todos.at_position(position).cloned())
            .await
            .ok_or(ShellError::NoSuchItem(position))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{TodoId, TodoList};
    use std::sync::Arc;
    use tasklist_testing::{InMemoryStorage, SequentialIds};

    fn shell_with(items: &[&str]) -> (Shell, InMemoryStorage) {
        let storage = InMemoryStorage::new();
        let todos: Vec<TodoItem> = items
            .iter()
            .zip(1..)
            .map(|(name, id)| TodoItem::new(TodoId::new(id), (*name).to_string()))
            .collect();
        let next = u64::try_from(items.len()).unwrap_or(0) + 1;
        let env = TodoEnvironment::new(
            Arc::new(SequentialIds::starting_at(next)),
            Arc::new(storage.clone()),
            "todos",
        );
        let store = TodoStore::new(
            TodoState::with_todos(TodoList::from(todos)),
            TodoReducer::new(),
            env,
        );
        (Shell::new(store), storage)
    }

    #[tokio::test]
    async fn empty_screen_shows_input_hint() {
        let (shell, _storage) = shell_with(&[]);

        let screen = shell.render(false).await;

        assert!(screen.contains("Nhập công việc...  [Thêm]"));
        assert!(screen.ends_with("Chưa có công việc nào\n"));
    }

    #[tokio::test]
    async fn blank_submit_raises_flag_without_sending() {
        let (mut shell, storage) = shell_with(&[]);

        assert!(!shell.submit("   ").await.unwrap());

        assert!(shell.show_error());
        assert_eq!(storage.write_count(), 0);
        assert!(shell.render(false).await.contains(messages::NAME_REQUIRED));
    }

    #[tokio::test]
    async fn submit_trims_and_clears_flag() {
        let (mut shell, _storage) = shell_with(&[]);
        shell.submit("").await.unwrap();

        assert!(shell.submit("  Buy milk  ").await.unwrap());

        assert!(!shell.show_error());
        let names: Vec<String> = shell
            .store()
            .state(|s| s.todos.iter().map(|t| t.name.clone()).collect())
            .await;
        assert_eq!(names, vec!["Buy milk".to_string()]);
    }

    #[tokio::test]
    async fn edit_dialog_prefills_and_renames_verbatim() {
        let (mut shell, _storage) = shell_with(&["Buy milk"]);

        shell.open_edit(1).await.unwrap();
        assert_eq!(
            shell.dialog(),
            &Dialog::Editing {
                id: TodoId::new(1),
                draft: "Buy milk".to_string()
            }
        );

        shell.confirm_edit(" Buy oat milk ").await.unwrap();

        assert!(!shell.dialog().is_visible());
        let name = shell
            .store()
            .state(|s| s.todos.get(TodoId::new(1)).map(|t| t.name.clone()))
            .await;
        assert_eq!(name.as_deref(), Some(" Buy oat milk "));
    }

    #[tokio::test]
    async fn only_one_dialog_at_a_time() {
        let (mut shell, _storage) = shell_with(&["a", "b"]);

        shell.open_delete(2).await.unwrap();

        assert!(matches!(shell.open_edit(1).await, Err(ShellError::DialogOpen)));
        assert!(matches!(shell.open_delete(1).await, Err(ShellError::DialogOpen)));
        assert!(matches!(shell.confirm_edit("x").await, Err(ShellError::NoDialog)));
        assert!(shell.dialog().is_confirming_delete());
    }

    #[tokio::test]
    async fn cancel_leaves_list_untouched() {
        let (mut shell, storage) = shell_with(&["a"]);

        shell.open_delete(1).await.unwrap();
        assert!(shell.close_dialog());
        assert!(!shell.close_dialog());

        assert_eq!(shell.store().state(|s| s.todos.len()).await, 1);
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn confirm_delete_removes_target() {
        let (mut shell, _storage) = shell_with(&["a", "b"]);

        shell.open_delete(1).await.unwrap();
        shell.confirm_delete().await.unwrap();

        assert!(!shell.dialog().is_visible());
        let ids: Vec<u64> = shell
            .store()
            .state(|s| s.todos.iter().map(|t| t.id.get()).collect())
            .await;
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn positions_outside_the_list_are_rejected() {
        let (mut shell, _storage) = shell_with(&["a"]);

        assert!(matches!(shell.toggle(0).await, Err(ShellError::NoSuchItem(0))));
        assert!(matches!(shell.toggle(2).await, Err(ShellError::NoSuchItem(2))));
        assert!(matches!(shell.open_edit(5).await, Err(ShellError::NoSuchItem(5))));
        assert!(!shell.dialog().is_visible());
    }
}
