//! Terminal to-do list.
//!
//! Run with: `cargo run -p tasklist`
//!
//! The list is saved to `$TASKLIST_DATA_DIR/$TASKLIST_STORAGE_KEY.json`
//! after every change. Logs go to stderr; set `RUST_LOG` or `TASKLIST_LOG`
//! to see more of them.

use anyhow::Context;
use std::io::IsTerminal;
use std::sync::Arc;
use tasklist::file_storage::FileStorage;
use tasklist::{
    persistence, repl, Config, Shell, TodoEnvironment, TodoReducer, TodoState, TodoStore,
};
use tasklist_core::environment::{MonotonicIds, SystemClock};
use tasklist_core::storage::validate_key;
use tasklist_runtime::metrics::describe_store_metrics;
use tasklist_runtime::StoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    describe_store_metrics();

    validate_key(&config.storage_key)
        .with_context(|| format!("invalid TASKLIST_STORAGE_KEY {:?}", config.storage_key))?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Starting tasklist"
    );

    let storage = Arc::new(FileStorage::new(&config.data_dir));
    let todos = persistence::load(storage.as_ref(), &config.storage_key).await;
    tracing::info!(count = todos.len(), "Loaded list");

    let ids = MonotonicIds::from_clock(&SystemClock);
    if let Some(max) = todos.max_id() {
        ids.observe(max.get());
    }

    let env = TodoEnvironment::new(Arc::new(ids), storage, config.storage_key.clone());
    let store = TodoStore::with_config(
        TodoState::with_todos(todos),
        TodoReducer::new(),
        env,
        StoreConfig::default().with_max_actions_per_send(config.max_actions_per_send),
    );
    let mut shell = Shell::new(store);

    let ansi = std::io::stdout().is_terminal();
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    repl::run(&mut shell, stdin, &mut stdout, ansi)
        .await
        .context("terminal I/O failed")?;

    tracing::info!("Exiting");
    Ok(())
}
