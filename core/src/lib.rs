//! # Tasklist Core
//!
//! Core traits and types for the tasklist reducer architecture.
//!
//! The application is built as a functional core around a single reducer:
//! user intent becomes an action, the reducer updates state in place and
//! returns descriptions of side effects, and the runtime executes them.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (commands and the events fed back by effects)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//! - **Storage**: Flat key-value slots the application persists into
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_core::*;
//!
//! impl Reducer for NotesReducer {
//!     type State = Vec<String>;
//!     type Action = NotesAction;
//!     type Environment = NotesEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         notes: &mut Vec<String>,
//!         action: NotesAction,
//!         env: &NotesEnvironment,
//!     ) -> SmallVec<[Effect<NotesAction>; 4]> {
//!         match action {
//!             NotesAction::Jot(text) => notes.push(text),
//!             NotesAction::Saved => return SmallVec::new(),
//!         }
//!         smallvec![env.save(notes)]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Key-value storage slots
pub mod storage;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///     type Environment = TodoEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut TodoState,
    ///         action: TodoAction,
    ///         env: &TodoEnvironment,
    ///     ) -> SmallVec<[Effect<TodoAction>; 4]> {
    ///         match action {
    ///             TodoAction::Toggle { id } => {
    ///                 state.todos.toggle(id);
    ///                 smallvec![Self::persist(state, env)]
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime, in order
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values, not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap a future whose output is fed back into the reducer
        #[must_use]
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Returns true for `Effect::None`
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of fresh numeric identifiers
    ///
    /// Every call must return a value never returned before by the same
    /// generator.
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> u64;
    }

    /// Strictly increasing id generator
    ///
    /// Seeded once (usually from the clock), then counts upwards, so two ids
    /// requested within the same clock tick never collide.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_core::environment::{IdGenerator, MonotonicIds};
    ///
    /// let ids = MonotonicIds::starting_after(41);
    /// assert_eq!(ids.next_id(), 42);
    /// assert_eq!(ids.next_id(), 43);
    ///
    /// ids.observe(100);
    /// assert_eq!(ids.next_id(), 101);
    /// ```
    #[derive(Debug)]
    pub struct MonotonicIds {
        last: AtomicU64,
    }

    impl MonotonicIds {
        /// Create a generator whose first id is `last + 1`
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self {
                last: AtomicU64::new(last),
            }
        }

        /// Create a generator seeded with the clock's millisecond timestamp
        ///
        /// The first id equals the current timestamp in milliseconds, matching
        /// the shape of ids written by earlier versions of the data file.
        #[must_use]
        pub fn from_clock(clock: &dyn Clock) -> Self {
            let millis = u64::try_from(clock.now().timestamp_millis()).unwrap_or(0);
            Self::starting_after(millis.saturating_sub(1))
        }

        /// Ensure every future id is greater than `id`
        pub fn observe(&self, id: u64) {
            self.last.fetch_max(id, Ordering::SeqCst);
        }
    }

    impl IdGenerator for MonotonicIds {
        fn next_id(&self) -> u64 {
            self.last.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, IdGenerator, MonotonicIds, SystemClock};
    use chrono::{TimeZone, Utc};

    struct FrozenClock;

    impl Clock for FrozenClock {
        #[allow(clippy::unwrap_used)]
        fn now(&self) -> chrono::DateTime<Utc> {
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
        }
    }

    #[test]
    fn monotonic_ids_never_repeat_within_one_tick() {
        let ids = MonotonicIds::from_clock(&FrozenClock);
        let first = ids.next_id();
        let second = ids.next_id();

        assert_eq!(first, 1_700_000_000_000);
        assert_eq!(second, first + 1);
    }

    #[test]
    fn observe_only_moves_forward() {
        let ids = MonotonicIds::starting_after(10);
        ids.observe(5);
        assert_eq!(ids.next_id(), 11);
        ids.observe(20);
        assert_eq!(ids.next_id(), 21);
    }

    #[test]
    fn system_clock_is_monotone_enough() {
        let clock = SystemClock;
        assert!(clock.now() <= clock.now());
    }

    #[tokio::test]
    async fn future_effect_yields_its_action() {
        let effect: Effect<u8> = Effect::future(async { Some(7) });
        assert!(!effect.is_none());

        let Effect::Future(fut) = effect else {
            unreachable!("constructed as a future");
        };
        assert_eq!(fut.await, Some(7));
    }

    #[test]
    fn debug_hides_future_body() {
        let effect: Effect<u8> = Effect::future(async { None });
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
        assert_eq!(format!("{:?}", Effect::<u8>::None), "Effect::None");
    }
}
