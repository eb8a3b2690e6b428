//! Stop protocol for the arena loop.
//!
//! The stop request is a plain atomic, never a lock held across a drain, so a
//! task can stop the arena that is currently executing it without deadlock.
//! External stoppers block on a separate exit gate until the loop is
//! observably done.

use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};

/// How shutdown has been requested, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopState {
    /// No stop requested.
    Running,
    /// Halt after one more full cycle covering everything pending.
    Deferred,
    /// Halt at the next cycle boundary.
    Immediate,
}

impl StopState {
    /// Convert from u8 (for atomic storage).
    #[inline]
    pub fn from_u8(val: u8) -> Self {
        match val {
            1 => StopState::Deferred,
            2 => StopState::Immediate,
            _ => StopState::Running,
        }
    }

    /// Convert to u8 (for atomic storage).
    #[inline]
    pub fn as_u8(&self) -> u8 {
        match self {
            StopState::Running => 0,
            StopState::Deferred => 1,
            StopState::Immediate => 2,
        }
    }
}

/// Thread-safe, reentrancy-aware shutdown flag.
pub struct StopSignal {
    /// Requested stop state.
    state: AtomicU8,
    /// Identity of the thread hosting the loop, bound at loop entry.
    loop_thread: Mutex<Option<ThreadId>>,
    /// Set once the loop has fully exited.
    exited: Mutex<bool>,
    /// Signaled when `exited` flips, releasing blocked stoppers.
    exit_gate: Condvar,
}

impl StopSignal {
    /// Create a signal in the running state.
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(StopState::Running.as_u8()),
            loop_thread: Mutex::new(None),
            exited: Mutex::new(false),
            exit_gate: Condvar::new(),
        }
    }

    /// Current stop request.
    #[inline]
    pub fn state(&self) -> StopState {
        StopState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// True when any stop has been requested.
    #[inline]
    pub fn stop_requested(&self) -> bool {
        self.state() != StopState::Running
    }

    /// Request an immediate halt. Wins over a pending deferred request.
    pub fn request_immediate(&self) {
        self.state
            .store(StopState::Immediate.as_u8(), Ordering::SeqCst);
    }

    /// Request a deferred halt.
    ///
    /// A no-op once an immediate halt is pending: the request never
    /// downgrades the stop state.
    pub fn request_deferred(&self) {
        let _ = self.state.compare_exchange(
            StopState::Running.as_u8(),
            StopState::Deferred.as_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    /// Record the calling thread as the loop host.
    pub fn bind_loop_thread(&self) {
        *self.loop_thread.lock() = Some(thread::current().id());
    }

    /// True when called from the thread hosting the loop.
    ///
    /// This is the reentrancy check: a stop issued from inside a task must
    /// not wait for, or join, its own thread.
    pub fn is_loop_thread(&self) -> bool {
        *self.loop_thread.lock() == Some(thread::current().id())
    }

    /// Mark the loop as fully exited and release every waiter.
    pub fn mark_exited(&self) {
        let mut exited = self.exited.lock();
        *exited = true;
        self.exit_gate.notify_all();
    }

    /// Block until the loop has fully exited.
    pub fn wait_exited(&self) {
        let mut exited = self.exited.lock();
        while !*exited {
            self.exit_gate.wait(&mut exited);
        }
    }

    /// True once the loop has exited.
    #[inline]
    pub fn has_exited(&self) -> bool {
        *self.exited.lock()
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
