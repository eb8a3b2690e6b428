//! Arena unit tests.
//!
//! Covers the double-buffered queue, the stop protocol and the
//! mode-dependent arena surface.

use crate::arena::{
    ArenaError, ExecState, RuntimeArena, StopSignal, StopState, Task, TaskQueue,
};

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[cfg(test)]
mod stop_state_tests {
    use super::*;

    #[test]
    fn test_stop_state_u8_round_trip() {
        for state in [
            StopState::Running,
            StopState::Deferred,
            StopState::Immediate,
        ] {
            assert_eq!(StopState::from_u8(state.as_u8()), state);
        }
    }

    #[test]
    fn test_stop_state_unknown_byte_is_running() {
        assert_eq!(StopState::from_u8(7), StopState::Running);
    }

    #[test]
    fn test_deferred_does_not_downgrade_immediate() {
        let signal = StopSignal::new();
        signal.request_immediate();
        signal.request_deferred();
        assert_eq!(signal.state(), StopState::Immediate);
    }

    #[test]
    fn test_immediate_overrides_deferred() {
        let signal = StopSignal::new();
        signal.request_deferred();
        assert_eq!(signal.state(), StopState::Deferred);
        signal.request_immediate();
        assert_eq!(signal.state(), StopState::Immediate);
    }

    #[test]
    fn test_stop_requested() {
        let signal = StopSignal::new();
        assert!(!signal.stop_requested());
        signal.request_deferred();
        assert!(signal.stop_requested());
    }
}

#[cfg(test)]
mod exec_state_tests {
    use super::*;

    #[test]
    fn test_exec_state_u8_round_trip() {
        for state in [ExecState::Idle, ExecState::Draining, ExecState::Stopped] {
            assert_eq!(ExecState::from_u8(state.as_u8()), state);
        }
    }

    #[test]
    fn test_exec_state_unknown_byte_is_idle() {
        assert_eq!(ExecState::from_u8(9), ExecState::Idle);
    }
}

#[cfg(test)]
mod queue_tests {
    use super::*;

    fn counting_task(counter: &Arc<AtomicUsize>) -> Arc<dyn Task> {
        let counter = Arc::clone(counter);
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_append_goes_to_pending() {
        let queue = TaskQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));
        queue.append(counting_task(&counter));
        assert_eq!(queue.pending_len(), 1);
        assert!(!queue.is_empty());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_swap_then_drain_executes_batch() {
        let queue = TaskQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));
        queue.append(counting_task(&counter));
        queue.append(counting_task(&counter));
        assert_eq!(queue.swap(), 2);
        assert!(queue.is_empty());
        queue.drain();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(queue.swap(), 0);
    }

    #[test]
    fn test_drain_runs_in_submission_order() {
        let queue = TaskQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..5 {
            let order = Arc::clone(&order);
            queue.append(Arc::new(move || order.lock().push(i)));
        }
        queue.swap();
        queue.drain();
        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_append_during_drain_defers_to_next_cycle() {
        let queue = Arc::new(TaskQueue::new());
        let counter = Arc::new(AtomicUsize::new(0));
        let reentrant_queue = Arc::clone(&queue);
        let reentrant_counter = Arc::clone(&counter);
        queue.append(Arc::new(move || {
            reentrant_counter.fetch_add(1, Ordering::SeqCst);
            let inner_counter = Arc::clone(&reentrant_counter);
            reentrant_queue.append(Arc::new(move || {
                inner_counter.fetch_add(1, Ordering::SeqCst);
            }));
        }));
        queue.swap();
        queue.drain();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(queue.pending_len(), 1);
        queue.swap();
        queue.drain();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_wait_until_returns_on_pending_task() {
        let queue = TaskQueue::new();
        queue.append(Arc::new(|| {}));
        queue.wait_until(|| false);
    }

    #[test]
    fn test_wait_until_respects_interrupt() {
        let queue = TaskQueue::new();
        queue.wait_until(|| true);
    }

    #[test]
    fn test_wake_releases_cross_thread_waiter() {
        let queue = TaskQueue::new();
        let interrupted = AtomicBool::new(false);
        thread::scope(|s| {
            s.spawn(|| {
                queue.wait_until(|| interrupted.load(Ordering::SeqCst));
            });
            interrupted.store(true, Ordering::SeqCst);
            queue.wake();
        });
    }
}

#[cfg(test)]
mod signal_gate_tests {
    use super::*;

    #[test]
    fn test_wait_exited_after_mark_returns() {
        let signal = StopSignal::new();
        assert!(!signal.has_exited());
        signal.mark_exited();
        signal.wait_exited();
        assert!(signal.has_exited());
    }

    #[test]
    fn test_exit_gate_releases_cross_thread_waiter() {
        let signal = StopSignal::new();
        thread::scope(|s| {
            s.spawn(|| signal.wait_exited());
            signal.mark_exited();
        });
        assert!(signal.has_exited());
    }

    #[test]
    fn test_loop_thread_identity() {
        let signal = StopSignal::new();
        assert!(!signal.is_loop_thread());
        signal.bind_loop_thread();
        assert!(signal.is_loop_thread());
        thread::scope(|s| {
            s.spawn(|| assert!(!signal.is_loop_thread()));
        });
    }
}

#[cfg(test)]
mod arena_api_tests {
    use super::*;

    #[test]
    fn test_unmanaged_push_runs_synchronously() {
        let arena = RuntimeArena::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        arena
            .push_task(Arc::new(move || flag.store(true, Ordering::SeqCst)))
            .unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_unmanaged_push_runs_on_calling_thread() {
        let arena = RuntimeArena::new();
        let caller = thread::current().id();
        let hit = Arc::new(AtomicBool::new(false));
        let observed = Arc::clone(&hit);
        arena
            .push_task(Arc::new(move || {
                assert_eq!(thread::current().id(), caller);
                observed.store(true, Ordering::SeqCst);
            }))
            .unwrap();
        assert!(hit.load(Ordering::SeqCst));
    }

    #[test]
    fn test_unmanaged_rejects_loop_calls() {
        let arena = RuntimeArena::new();
        assert!(matches!(arena.start(), Err(ArenaError::Unmanaged)));
        assert!(matches!(arena.stop(), Err(ArenaError::Unmanaged)));
        assert!(matches!(arena.stop_in_future(), Err(ArenaError::Unmanaged)));
        assert!(matches!(arena.capture(), Err(ArenaError::Unmanaged)));
    }

    #[test]
    fn test_default_is_unmanaged() {
        let arena = RuntimeArena::default();
        assert!(matches!(arena.start(), Err(ArenaError::Unmanaged)));
    }

    #[test]
    fn test_managed_starts_idle() {
        let arena = RuntimeArena::managed();
        assert_eq!(arena.state(), ExecState::Idle);
        arena.push_task(Arc::new(|| {})).unwrap();
    }

    #[test]
    fn test_second_activation_rejected() {
        let arena = RuntimeArena::managed();
        arena.start().unwrap();
        assert!(matches!(arena.start(), Err(ArenaError::AlreadyRunning)));
        assert!(matches!(arena.capture(), Err(ArenaError::AlreadyRunning)));
        arena.stop().unwrap();
    }

    #[test]
    fn test_push_after_stop_rejected() {
        let arena = RuntimeArena::managed();
        arena.start().unwrap();
        arena.stop().unwrap();
        assert_eq!(arena.state(), ExecState::Stopped);
        let res = arena.push_task(Arc::new(|| {}));
        assert!(matches!(res, Err(ArenaError::Stopped)));
    }

    #[test]
    fn test_stop_before_start_returns_without_blocking() {
        let arena = RuntimeArena::managed();
        arena.stop().unwrap();
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ArenaError::Unmanaged.to_string(),
            "arena is unmanaged: no loop to control"
        );
        assert_eq!(
            ArenaError::AlreadyRunning.to_string(),
            "arena loop was already started"
        );
        assert_eq!(
            ArenaError::Stopped.to_string(),
            "arena is stopped and no longer accepts tasks"
        );
    }

    #[test]
    fn test_debug_reports_mode_and_state() {
        let arena = RuntimeArena::managed();
        let dump = format!("{:?}", arena);
        assert!(dump.contains("Managed"));
        assert!(dump.contains("Idle"));
    }
}
