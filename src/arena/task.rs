//! Task definitions for the arena.
//!
//! A task is a unit of work with a single entry point. The arena never owns
//! task state: the submitter keeps its own handle and the arena holds a clone
//! only until the task has run.

use std::sync::Arc;

/// A unit of work executable by a [`RuntimeArena`](super::RuntimeArena).
///
/// Implementers keep their state interior-mutable (atomics, locks): `execute`
/// takes `&self`, so the submitting thread can observe the same handle after
/// the task ran.
pub trait Task: Send + Sync {
    /// Run the task to completion.
    ///
    /// There is no return value; a failure propagates as a panic and is not
    /// caught by the arena.
    fn execute(&self);
}

/// Any sharable closure is a task.
impl<F> Task for F
where
    F: Fn() + Send + Sync,
{
    fn execute(&self) {
        self()
    }
}

/// Shared task handle the arena trades in.
pub type TaskRef = Arc<dyn Task>;
