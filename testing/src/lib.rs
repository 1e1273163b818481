//! # Tasklist Testing
//!
//! Testing utilities and helpers for the tasklist reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - In-memory and failing storage backends
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{test_clock, InMemoryStorage, SequentialIds};
//! use tasklist_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_add_flow() {
//!     let env = TodoEnvironment::new(Arc::new(SequentialIds::new()), Arc::new(InMemoryStorage::new()), "todos");
//!     let store = Store::new(TodoState::default(), TodoReducer::new(), env);
//!
//!     store.send(TodoAction::Add { name: "Buy milk".into() }).await?;
//!
//!     assert_eq!(store.state(|s| s.todos.len()).await, 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::{Clock, IdGenerator};


/// In-memory storage backends for tests
pub mod storage_mocks;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable ids: 1, 2, 3, ...
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::SequentialIds;
    /// use tasklist_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIds::new();
    /// assert_eq!(ids.next_id(), 1);
    /// assert_eq!(ids.next_id(), 2);
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        issued: AtomicU64,
    }

    impl SequentialIds {
        /// Start counting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Start counting at `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                issued: AtomicU64::new(first.saturating_sub(1)),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> u64 {
            self.issued.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    /// Replays a fixed script of ids, then keeps returning the last one
    ///
    /// Useful for forcing collisions with ids already in state.
    #[derive(Debug)]
    pub struct ScriptedIds {
        script: Vec<u64>,
        cursor: AtomicU64,
    }

    impl ScriptedIds {
        /// Create a generator that yields `script` in order
        #[must_use]
        pub const fn new(script: Vec<u64>) -> Self {
            Self {
                script,
                cursor: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for ScriptedIds {
        fn next_id(&self) -> u64 {
            let index = self.cursor.fetch_add(1, Ordering::SeqCst);
            let index = usize::try_from(index).unwrap_or(usize::MAX);
            self.script
                .get(index)
                .or_else(|| self.script.last())
                .copied()
                .unwrap_or(0)
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, ScriptedIds, SequentialIds};
pub use reducer_test::{assertions, ReducerTest};
pub use storage_mocks::{FailingStorage, InMemoryStorage};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn sequential_ids_start_where_asked() {
        let ids = SequentialIds::starting_at(40);
        assert_eq!(ids.next_id(), 40);
        assert_eq!(ids.next_id(), 41);
    }

    #[test]
    fn scripted_ids_repeat_the_last_entry() {
        let ids = ScriptedIds::new(vec![5, 9]);
        assert_eq!(ids.next_id(), 5);
        assert_eq!(ids.next_id(), 9);
        assert_eq!(ids.next_id(), 9);
    }
}
