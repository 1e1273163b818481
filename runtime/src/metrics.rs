//! Metric names recorded by the Store.
//!
//! The store records through the `metrics` facade. Nothing is exported
//! unless the host application installs a recorder; without one every call
//! is a no-op.
//!
//! # Example
//!
//! ```rust
//! use tasklist_runtime::metrics::describe_store_metrics;
//!
//! // Once at start-up, after installing a recorder (if any)
//! describe_store_metrics();
//! ```

use metrics::{describe_counter, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions processed by `Store::send`, including fed-back actions.
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Wall time spent inside the reducer per action.
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Effects executed, labelled by `type` (`none` or `future`).
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";

/// `send` calls aborted because the feedback loop ran too long.
pub const FEEDBACK_LIMIT_HIT: &str = "store.feedback_limit.exceeded";

/// Register descriptions for every store metric with the installed recorder.
pub fn describe_store_metrics() {
    describe_counter!(
        ACTIONS_TOTAL,
        Unit::Count,
        "Actions processed by the store, including fed-back actions"
    );
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Time spent in the reducer per action"
    );
    describe_counter!(
        EFFECTS_EXECUTED,
        Unit::Count,
        "Effects executed by the store, by type"
    );
    describe_counter!(
        FEEDBACK_LIMIT_HIT,
        Unit::Count,
        "Sends aborted because effects kept producing actions"
    );
}
