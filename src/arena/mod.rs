//! Task-execution arena.
//!
//! [`RuntimeArena`] multiplexes task execution across three operating modes:
//!
//! - **Unmanaged** ([`RuntimeArena::new`]): no loop exists; `push_task`
//!   executes the task synchronously on the calling thread.
//! - **Managed** ([`RuntimeArena::managed`] + [`RuntimeArena::start`]): a
//!   dedicated spawned thread hosts the run loop; submissions buffer in a
//!   double-buffered queue until the loop drains them.
//! - **Captured** ([`RuntimeArena::managed`] + [`RuntimeArena::capture`]):
//!   the calling thread hosts the same loop, blocking until a stop request
//!   completes.
//!
//! Shutdown is reentrancy-safe: a task may stop the arena that is currently
//! executing it without deadlocking.

pub mod queue;
pub mod signal;
pub mod task;

mod executor;

pub use executor::ExecState;
pub use queue::TaskQueue;
pub use signal::{StopSignal, StopState};
pub use task::{Task, TaskRef};

use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use executor::CycleExecutor;

#[cfg(test)]
mod tests;

/// Errors reported for arena misuse and loop-thread failures.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// Loop-related call on an unmanaged arena.
    #[error("arena is unmanaged: no loop to control")]
    Unmanaged,
    /// `start()` or `capture()` was already consumed for this instance.
    #[error("arena loop was already started")]
    AlreadyRunning,
    /// Submission after the loop exited.
    #[error("arena is stopped and no longer accepts tasks")]
    Stopped,
    /// The loop thread could not be spawned.
    #[error("failed to spawn arena loop thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Operating mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Unmanaged,
    Managed,
}

/// Task-execution arena with unmanaged, managed and captured operation.
pub struct RuntimeArena {
    /// Operating mode.
    mode: Mode,
    /// Loop state shared with whichever thread hosts it.
    executor: Arc<CycleExecutor>,
    /// One-shot latch: at most one `start()`/`capture()` per lifetime.
    activated: AtomicBool,
    /// Join handle of the managed loop thread, taken by the stopping caller.
    loop_thread: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for RuntimeArena {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("RuntimeArena")
            .field("mode", &self.mode)
            .field("state", &self.state())
            .field("pending", &self.executor.queue().pending_len())
            .finish()
    }
}

impl RuntimeArena {
    /// Create an unmanaged arena: every submission executes synchronously.
    pub fn new() -> Self {
        Self::with_mode(Mode::Unmanaged)
    }

    /// Create a managed arena, idle until [`start`](Self::start) or
    /// [`capture`](Self::capture) hosts its loop.
    pub fn managed() -> Self {
        Self::with_mode(Mode::Managed)
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            executor: Arc::new(CycleExecutor::new()),
            activated: AtomicBool::new(false),
            loop_thread: Mutex::new(None),
        }
    }

    /// Current state of the run loop. Always `Idle` for unmanaged arenas.
    #[inline]
    pub fn state(&self) -> ExecState {
        self.executor.state()
    }

    /// Submit a task.
    ///
    /// In unmanaged mode the task executes on the calling thread and this
    /// returns once it completed. In managed mode the task is appended to the
    /// pending buffer, also before the loop is hosted (submissions survive
    /// the idle-to-running transition), and the call fails with
    /// [`ArenaError::Stopped`] once the loop has exited.
    pub fn push_task(
        &self,
        task: TaskRef,
    ) -> Result<(), ArenaError> {
        match self.mode {
            Mode::Unmanaged => {
                task.execute();
                Ok(())
            }
            Mode::Managed => {
                if self.executor.state() == ExecState::Stopped {
                    return Err(ArenaError::Stopped);
                }
                self.executor.queue().append(task);
                Ok(())
            }
        }
    }

    /// Host the loop on a dedicated spawned thread.
    ///
    /// Managed arenas only, at most once per instance.
    pub fn start(&self) -> Result<(), ArenaError> {
        self.require_managed()?;
        self.activate()?;
        let executor = Arc::clone(&self.executor);
        let spawned = thread::Builder::new()
            .name("arena-loop".into())
            .spawn(move || executor.run());
        let handle = match spawned {
            Ok(handle) => handle,
            Err(err) => {
                // Nothing will ever host the loop; settle the exit gate so
                // stop() callers are not left waiting.
                self.executor.abandon();
                return Err(ArenaError::Spawn(err));
            }
        };
        *self.loop_thread.lock() = Some(handle);
        debug!("arena loop thread spawned");
        Ok(())
    }

    /// Host the loop on the calling thread until a stop request completes.
    ///
    /// Managed arenas only, at most once per instance, and mutually
    /// exclusive with [`start`](Self::start).
    pub fn capture(&self) -> Result<(), ArenaError> {
        self.require_managed()?;
        self.activate()?;
        self.executor.run();
        Ok(())
    }

    /// Request an immediate halt.
    ///
    /// Called from any thread other than the loop thread, this blocks until
    /// the loop has observably exited and, for a spawned loop, the thread has
    /// been joined; a panic that killed the loop resurfaces here. Called from
    /// inside a task the loop is currently executing, it records the request
    /// and returns at once, since the loop thread cannot wait on itself.
    /// Before the loop is hosted, the request is recorded without blocking.
    pub fn stop(&self) -> Result<(), ArenaError> {
        self.require_managed()?;
        self.executor.signal().request_immediate();
        self.executor.queue().wake();
        if self.executor.signal().is_loop_thread() {
            debug!("self-stop requested from inside the loop");
            return Ok(());
        }
        if !self.activated.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.executor.signal().wait_exited();
        if let Some(handle) = self.loop_thread.lock().take() {
            if let Err(payload) = handle.join() {
                panic::resume_unwind(payload);
            }
        }
        Ok(())
    }

    /// Request a halt after one more full cycle, without blocking.
    ///
    /// The loop drains everything pending at the time of the request (plus
    /// whatever those tasks submit during the final cycle) and then exits.
    pub fn stop_in_future(&self) -> Result<(), ArenaError> {
        self.require_managed()?;
        self.executor.signal().request_deferred();
        self.executor.queue().wake();
        Ok(())
    }

    fn require_managed(&self) -> Result<(), ArenaError> {
        match self.mode {
            Mode::Managed => Ok(()),
            Mode::Unmanaged => Err(ArenaError::Unmanaged),
        }
    }

    fn activate(&self) -> Result<(), ArenaError> {
        if self.activated.swap(true, Ordering::SeqCst) {
            return Err(ArenaError::AlreadyRunning);
        }
        Ok(())
    }
}

impl Default for RuntimeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RuntimeArena {
    fn drop(&mut self) {
        if self.mode != Mode::Managed || !self.activated.load(Ordering::SeqCst) {
            return;
        }
        if self.executor.signal().is_loop_thread() {
            // Dropped from inside a task; the loop thread cannot reap itself.
            return;
        }
        if !self.executor.signal().has_exited() {
            debug!("arena dropped while running, stopping the loop");
            self.executor.signal().request_immediate();
            self.executor.queue().wake();
            self.executor.signal().wait_exited();
        }
        if let Some(handle) = self.loop_thread.lock().take() {
            // Panic payloads surface from stop(), not from drop.
            let _ = handle.join();
        }
    }
}
