//! # Tasklist Runtime
//!
//! Runtime implementation for the tasklist reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Feedback Loop**: Actions produced by effects are reduced in the same `send`
//!
//! ## Execution Model
//!
//! `send` is run-to-completion: the reducer runs under the state lock, then the
//! returned effects are awaited one after another, and any actions they
//! produce are reduced before `send` returns. Nothing is spawned, so effects of
//! one action always finish before the next `send` starts.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use tasklist_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

/// Metric names recorded by the store
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept producing actions past the configured bound
        ///
        /// State changes made by the processed actions are kept; the
        /// remaining fed-back actions are dropped.
        #[error("Feedback loop exceeded {0} actions in a single send")]
        FeedbackLimitExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_actions_per_send(8);
/// assert_eq!(config.max_actions_per_send, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Upper bound on actions reduced by one `send`, counting the initial
    /// action and everything fed back by its effects
    pub max_actions_per_send: usize,
}

impl StoreConfig {
    /// Set the feedback-loop bound (values below 1 are raised to 1)
    #[must_use]
    pub const fn with_max_actions_per_send(mut self, max: usize) -> Self {
        self.max_actions_per_send = if max == 0 { 1 } else { max };
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_actions_per_send: 16,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::metrics::{ACTIONS_TOTAL, EFFECTS_EXECUTED, FEEDBACK_LIMIT_HIT, REDUCER_DURATION};
    use super::{Arc, Effect, Reducer, RwLock, StoreConfig, StoreError};
    use std::collections::VecDeque;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for shared read access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Cloning a Store is cheap and yields another handle to the same state,
    /// which is how components receive it.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config,
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync,
        A: Send,
        S: Send + Sync,
        E: Send + Sync,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Reduces the action, awaits its effects in order, and reduces every
        /// action those effects produce, until the queue is empty.
        ///
        /// # Returns
        ///
        /// The number of actions reduced (the initial one included).
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if more than
        /// `max_actions_per_send` actions would be reduced.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<usize, StoreError> {
            let limit = self.config.max_actions_per_send;
            let mut queue = VecDeque::from([action]);
            let mut processed = 0;

            while let Some(action) = queue.pop_front() {
                if processed == limit {
                    tracing::warn!(limit, dropped = queue.len() + 1, "Feedback limit reached");
                    metrics::counter!(FEEDBACK_LIMIT_HIT).increment(1);
                    return Err(StoreError::FeedbackLimitExceeded(limit));
                }
                processed += 1;
                metrics::counter!(ACTIONS_TOTAL).increment(1);

                let effects = {
                    let mut state = self.state.write().await;
                    tracing::trace!("Acquired write lock on state");

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                    metrics::histogram!(REDUCER_DURATION).record(start.elapsed().as_secs_f64());

                    tracing::trace!("Reducer completed, returned {} effects", effects.len());
                    effects
                };

                for effect in effects {
                    match effect {
                        Effect::None => {
                            tracing::trace!("Executing Effect::None (no-op)");
                            metrics::counter!(EFFECTS_EXECUTED, "type" => "none").increment(1);
                        },
                        Effect::Future(fut) => {
                            tracing::trace!("Executing Effect::Future");
                            metrics::counter!(EFFECTS_EXECUTED, "type" => "future").increment(1);
                            if let Some(next) = fut.await {
                                tracing::trace!("Effect::Future produced an action, queueing");
                                queue.push_back(next);
                            }
                        },
                    }
                }
            }

            tracing::debug!(processed, "Action processing completed");
            Ok(processed)
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let open = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }
    }
}

pub use store::Store;
