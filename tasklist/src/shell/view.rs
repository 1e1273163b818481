//! Text rendering of the list screen.

use super::dialog::Dialog;
use super::messages;
use crate::types::{TodoList, TodoState};
use std::fmt;

const STRIKE_ON: &str = "\x1b[9m";
const STRIKE_OFF: &str = "\x1b[0m";

/// Footer line summarizing progress
///
/// # Example
///
/// ```
/// use tasklist::shell::view::footer;
/// use tasklist::types::TodoList;
///
/// assert_eq!(footer(&TodoList::new()), "Chưa có công việc nào");
/// ```
#[must_use]
pub fn footer(todos: &TodoList) -> String {
    if todos.is_empty() {
        messages::EMPTY.to_string()
    } else if todos.all_completed() {
        messages::ALL_DONE.to_string()
    } else {
        messages::progress(todos.completed_count(), todos.len())
    }
}

/// One frame of the list screen
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    state: &'a TodoState,
    dialog: &'a Dialog,
    show_error: bool,
    ansi: bool,
}

impl<'a> View<'a> {
    /// Frame for the given store state and shell flags
    #[must_use]
    pub const fn new(state: &'a TodoState, dialog: &'a Dialog, show_error: bool) -> Self {
        Self {
            state,
            dialog,
            show_error,
            ansi: false,
        }
    }

    /// Strike completed names through with ANSI escapes
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    fn write_dialog(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dialog {
            Dialog::Closed => Ok(()),
            Dialog::Editing { draft, .. } => {
                writeln!(f)?;
                writeln!(f, "[{}] {draft}", messages::EDIT_TITLE)?;
                writeln!(
                    f,
                    "{}: <...>  |  {}: {}",
                    messages::EDIT_CONFIRM,
                    messages::CANCEL,
                    messages::CANCEL_KEY
                )
            },
            Dialog::ConfirmingDelete { id } => {
                writeln!(f)?;
                writeln!(f, "{}", messages::DELETE_PROMPT)?;
                if let Some(item) = self.state.todos.get(*id) {
                    writeln!(f, "  {}", item.name)?;
                }
                writeln!(
                    f,
                    "{}: {}  |  {}: n",
                    messages::DELETE_CONFIRM,
                    messages::CONFIRM_DELETE_KEY,
                    messages::CANCEL
                )
            },
        }
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", messages::TITLE)?;
        writeln!(f, "{}  [{}]", messages::INPUT_HINT, messages::ADD)?;
        if self.show_error {
            writeln!(f, "{}", messages::NAME_REQUIRED)?;
        }

        for (index, item) in self.state.todos.iter().enumerate() {
            let position = index + 1;
            if !item.completed {
                writeln!(f, "{position:>3}. [ ] {}", item.name)?;
            } else if self.ansi {
                writeln!(f, "{position:>3}. [x] {STRIKE_ON}{}{STRIKE_OFF}", item.name)?;
            } else {
                writeln!(f, "{position:>3}. [x] {}", item.name)?;
            }
        }

        writeln!(f, "{}", footer(&self.state.todos))?;

        if let Some(error) = &self.state.persist_error {
            writeln!(f, "! {}", messages::save_failed(error))?;
        }

        self.write_dialog(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TodoId, TodoItem};

    fn state(items: &[(u64, &str, bool)]) -> TodoState {
        let items: Vec<TodoItem> = items
            .iter()
            .map(|&(id, name, completed)| TodoItem {
                id: TodoId::new(id),
                name: name.to_string(),
                completed,
            })
            .collect();
        TodoState::with_todos(TodoList::from(items))
    }

    #[test]
    fn footer_variants() {
        assert_eq!(footer(&TodoList::new()), "Chưa có công việc nào");
        assert_eq!(
            footer(&state(&[(1, "a", true), (2, "b", true)]).todos),
            "Tất cả công việc đã hoàn thành"
        );
        assert_eq!(
            footer(&state(&[(1, "a", true), (2, "b", false), (3, "c", false)]).todos),
            "1 / 3 công việc đã hoàn thành"
        );
        assert_eq!(
            footer(&state(&[(1, "a", false)]).todos),
            "0 / 1 công việc đã hoàn thành"
        );
    }

    #[test]
    fn renders_list_and_validation() {
        let state = state(&[(1, "Buy milk", false), (2, "Walk dog", true)]);
        let dialog = Dialog::Closed;

        let text = View::new(&state, &dialog, true).to_string();

        assert_eq!(
            text,
            "Danh sách công việc\n\
             Nhập công việc...  [Thêm]\n\
             Vui lòng nhập tên công việc!\n  \
             1. [ ] Buy milk\n  \
             2. [x] Walk dog\n\
             1 / 2 công việc đã hoàn thành\n"
        );
    }

    #[test]
    fn empty_list_still_shows_input_line() {
        let state = state(&[]);
        let dialog = Dialog::Closed;

        let text = View::new(&state, &dialog, false).to_string();

        assert_eq!(
            text,
            "Danh sách công việc\nNhập công việc...  [Thêm]\nChưa có công việc nào\n"
        );
    }

    #[test]
    fn ansi_strikes_completed_only() {
        let state = state(&[(1, "open", false), (2, "done", true)]);
        let dialog = Dialog::Closed;

        let text = View::new(&state, &dialog, false).with_ansi(true).to_string();

        assert!(text.contains("[ ] open\n"));
        assert!(text.contains("[x] \x1b[9mdone\x1b[0m"));
    }

    #[test]
    fn shows_save_failure() {
        let mut state = state(&[]);
        state.persist_error = Some("disk full".to_string());
        let dialog = Dialog::Closed;

        let text = View::new(&state, &dialog, false).to_string();

        assert!(text.contains("! Không thể lưu danh sách: disk full"));
    }

    #[test]
    fn renders_dialogs() {
        let state = state(&[(1, "Buy milk", false)]);

        let editing = Dialog::Editing {
            id: TodoId::new(1),
            draft: "Buy milk".to_string(),
        };
        let text = View::new(&state, &editing, false).to_string();
        assert!(text.contains("[Sửa công việc] Buy milk"));
        assert!(text.contains("Cập nhật"));

        let deleting = Dialog::ConfirmingDelete { id: TodoId::new(1) };
        let text = View::new(&state, &deleting, false).to_string();
        assert!(text.contains("Bạn có chắc muốn xoá công việc này?\n  Buy milk\n"));
        assert!(text.contains("Xoá: y  |  Huỷ: n"));
    }
}
