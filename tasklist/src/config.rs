//! Configuration management for the tasklist binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is honored by `main`.

use crate::persistence::DEFAULT_STORAGE_KEY;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the slot files (`TASKLIST_DATA_DIR`, default `.tasklist`)
    pub data_dir: PathBuf,
    /// Slot the list is saved under (`TASKLIST_STORAGE_KEY`, default `todos`)
    pub storage_key: String,
    /// Log filter used when `RUST_LOG` is unset (`TASKLIST_LOG`, default `warn`)
    pub log_filter: String,
    /// Feedback-loop bound for one store send (`TASKLIST_MAX_FEEDBACK`, default 16)
    pub max_actions_per_send: usize,
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values count as unset; unparsable numbers fall back to the default.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            data_dir: var("TASKLIST_DATA_DIR")
                .map_or_else(|| PathBuf::from(".tasklist"), PathBuf::from),
            storage_key: var("TASKLIST_STORAGE_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            log_filter: var("TASKLIST_LOG").unwrap_or_else(|| "warn".to_string()),
            max_actions_per_send: var("TASKLIST_MAX_FEEDBACK")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(16),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
