//! Modal dialogs gating edits and deletes.
//!
//! Both dialogs share one slot, so at most one of them is open at a time.

use crate::types::TodoId;

/// Which dialog is open, and what it targets
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Dialog {
    /// No dialog visible
    #[default]
    Closed,
    /// Edit-name dialog, pre-filled with the item's current name
    Editing {
        /// Item being renamed
        id: TodoId,
        /// Text the dialog opened with
        draft: String,
    },
    /// Delete confirmation
    ConfirmingDelete {
        /// Item to delete on confirm
        id: TodoId,
    },
}

impl Dialog {
    /// Whether any dialog is visible
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether the edit dialog is visible
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Whether the delete confirmation is visible
    #[must_use]
    pub const fn is_confirming_delete(&self) -> bool {
        matches!(self, Self::ConfirmingDelete { .. })
    }

    /// Close the dialog, returning what was open
    pub fn close(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_by_default() {
        let dialog = Dialog::default();
        assert!(!dialog.is_visible());
        assert!(!dialog.is_editing());
        assert!(!dialog.is_confirming_delete());
    }

    #[test]
    fn close_hands_back_previous_dialog() {
        let mut dialog = Dialog::Editing {
            id: TodoId::new(4),
            draft: "Buy milk".to_string(),
        };
        assert!(dialog.is_editing());

        let previous = dialog.close();

        assert!(!dialog.is_visible());
        assert!(matches!(previous, Dialog::Editing { ref draft, .. } if draft == "Buy milk"));
    }

    #[test]
    fn delete_dialog_targets_its_item() {
        let dialog = Dialog::ConfirmingDelete { id: TodoId::new(8) };
        assert!(dialog.is_confirming_delete());
        assert!(!dialog.is_editing());
        assert!(dialog.is_visible());
    }
}
