//! The list survives a restart when saved through `FileStorage`.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use tasklist::file_storage::FileStorage;
use tasklist::{persistence, Shell, TodoEnvironment, TodoReducer, TodoState, TodoStore};
use tasklist_core::environment::{IdGenerator, MonotonicIds};
use tasklist_testing::test_clock;

fn open(dir: &std::path::Path, todos: tasklist::TodoList) -> Shell {
    let ids = MonotonicIds::from_clock(&test_clock());
    if let Some(max) = todos.max_id() {
        ids.observe(max.get());
    }
    let ids: Arc<dyn IdGenerator> = Arc::new(ids);
    let env = TodoEnvironment::new(ids, Arc::new(FileStorage::new(dir)), "todos");
    Shell::new(TodoStore::new(
        TodoState::with_todos(todos),
        TodoReducer::new(),
        env,
    ))
}

#[tokio::test]
async fn list_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let first = persistence::load(&storage, "todos").await;
    assert!(first.is_empty());

    let mut shell = open(dir.path(), first);
    shell.submit("Buy milk").await.unwrap();
    shell.submit("Walk dog").await.unwrap();
    shell.toggle(1).await.unwrap();
    let before = shell.store().state(|s| s.todos.clone()).await;
    drop(shell);

    let second = persistence::load(&storage, "todos").await;
    assert_eq!(second, before);

    // Ids handed out after a restart never collide with restored ones
    let mut shell = open(dir.path(), second);
    shell.submit("Feed cat").await.unwrap();
    let ids: Vec<u64> = shell
        .store()
        .state(|s| s.todos.iter().map(|t| t.id.get()).collect())
        .await;
    assert_eq!(ids.len(), 3);
    assert!(ids[2] > ids[0] && ids[2] > ids[1]);
}

#[tokio::test]
async fn slot_file_holds_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = open(dir.path(), tasklist::TodoList::new());

    shell.submit("Buy milk").await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("todos.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let item = &value[0];
    assert_eq!(item["name"], "Buy milk");
    assert_eq!(item["completed"], false);
    assert!(item["id"].is_u64());
}

#[tokio::test]
async fn malformed_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("todos.json"), "{ not json").unwrap();

    let todos = persistence::load(&FileStorage::new(dir.path()), "todos").await;

    assert!(todos.is_empty());
}
