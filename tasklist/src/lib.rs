//! A terminal to-do list built on the tasklist reducer architecture.
//!
//! The list lives in a [`Store`](tasklist_runtime::Store) driven by
//! [`TodoReducer`]. Every command saves the whole list to a storage slot as
//! JSON, and the list is read back from that slot at start-up. [`Shell`]
//! sits between the user and the store, and [`repl`] drives it from a
//! terminal.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
//! use tasklist::file_storage::FileStorage;
//! use tasklist_core::environment::{MonotonicIds, SystemClock};
//! use tasklist_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(
//!     Arc::new(MonotonicIds::from_clock(&SystemClock)),
//!     Arc::new(FileStorage::new(".tasklist")),
//!     "todos",
//! );
//! let store = Store::new(TodoState::default(), TodoReducer::new(), env);
//!
//! store.send(TodoAction::Add { name: "Buy milk".to_string() }).await?;
//!
//! let open = store.state(|s| s.todos.len() - s.todos.completed_count()).await;
//! println!("Open: {open}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod file_storage;
pub mod persistence;
pub mod reducer;
pub mod repl;
pub mod shell;
pub mod types;

pub use config::Config;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use shell::{Shell, ShellError, TodoStore};
pub use types::{TodoAction, TodoId, TodoItem, TodoList, TodoState};
