//! User-facing text.

/// Heading above the list
pub const TITLE: &str = "Danh sách công việc";
/// Hint shown next to the input prompt
pub const INPUT_HINT: &str = "Nhập công việc...";
/// Label of the add action
pub const ADD: &str = "Thêm";
/// Shown while the last submitted name was blank
pub const NAME_REQUIRED: &str = "Vui lòng nhập tên công việc!";
/// Footer for an empty list
pub const EMPTY: &str = "Chưa có công việc nào";
/// Footer when every item is completed
pub const ALL_DONE: &str = "Tất cả công việc đã hoàn thành";

/// Heading of the edit dialog
pub const EDIT_TITLE: &str = "Sửa công việc";
/// Confirm label of the edit dialog
pub const EDIT_CONFIRM: &str = "Cập nhật";
/// Prompt of the delete dialog
pub const DELETE_PROMPT: &str = "Bạn có chắc muốn xoá công việc này?";
/// Confirm label of the delete dialog
pub const DELETE_CONFIRM: &str = "Xoá";
/// Cancel label of both dialogs
pub const CANCEL: &str = "Huỷ";

/// Footer when some items are still open
#[must_use]
pub fn progress(completed: usize, total: usize) -> String {
    format!("{completed} / {total} công việc đã hoàn thành")
}

/// Warning shown after a failed save
#[must_use]
pub fn save_failed(error: &str) -> String {
    format!("Không thể lưu danh sách: {error}")
}

/// Reply to a position that matches no item
#[must_use]
pub fn no_such_item(position: usize) -> String {
    format!("Không có công việc số {position}")
}

/// Line that cancels the edit dialog
pub const CANCEL_KEY: &str = ":huy";
/// Line that confirms the delete dialog (`xoa`/`xoá` work too)
pub const CONFIRM_DELETE_KEY: &str = "y";

/// Command summary printed by `help`
pub const HELP: &str = "\
  <tên> | add <tên>   Thêm công việc
  toggle <n>          Đánh dấu hoàn thành / chưa hoàn thành
  edit <n>            Sửa công việc
  delete <n>          Xoá công việc
  list                Hiện danh sách
  help                Trợ giúp
  quit                Thoát";

/// Reply to a command whose argument is not a position
#[must_use]
pub fn invalid_position(argument: &str) -> String {
    format!("Số thứ tự không hợp lệ: {argument}")
}
