//! Completion cell and the handle callers observe it through

use std::sync::{Arc, Condvar, Mutex};

use crate::error::TaskFailure;

/// Mutable state of a [`CompletionCell`], guarded by its mutex.
struct CompletionState {
    completed: bool,
    failure: Option<TaskFailure>,
}

/// Shared state recording whether a job has finished and, if it panicked,
/// what it panicked with.
///
/// Owned jointly by the submitting caller (through a [`CompletionHandle`])
/// and the worker that eventually runs the job. `completed` only ever moves
/// false → true; `failure` is written at most once, strictly before
/// `completed` flips.
pub struct CompletionCell {
    state: Mutex<CompletionState>,
    condvar: Condvar,
}

impl CompletionCell {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(CompletionState { completed: false, failure: None }),
            condvar: Condvar::new(),
        })
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.state.lock().unwrap().completed
    }

    pub(crate) fn wait_for_completion(&self) {
        let guard = self.state.lock().unwrap();
        let _guard = self
            .condvar
            .wait_while(guard, |state| !state.completed)
            .unwrap();
    }

    pub(crate) fn failure(&self) -> Option<TaskFailure> {
        self.state.lock().unwrap().failure.clone()
    }

    /// Record the outcome of running the job and wake every waiter.
    ///
    /// Called exactly once per cell, by the worker that ran the associated
    /// job.
    pub(crate) fn trigger_completion(&self, failure: Option<TaskFailure>) {
        let mut state = self.state.lock().unwrap();
        debug_assert!(!state.completed, "CompletionCell completed twice");
        state.failure = failure;
        state.completed = true;
        drop(state);
        self.condvar.notify_all();
    }
}

/// A caller-facing reference to a [`CompletionCell`].
///
/// Returned by a successful [`crate::multi_queue`]-backed scheduler
/// submission. Cheap to clone (an `Arc` clone) so multiple observers can
/// wait on the same job independently.
#[derive(Clone)]
pub struct CompletionHandle {
    cell: Arc<CompletionCell>,
}

impl CompletionHandle {
    pub(crate) fn new(cell: Arc<CompletionCell>) -> Self {
        Self { cell }
    }

    /// `true` once the job has run to completion (successfully or not).
    pub fn is_completed(&self) -> bool {
        self.cell.is_completed()
    }

    /// Block the calling thread until the job completes.
    ///
    /// Returns immediately if it already has. Multiple threads may wait on
    /// the same handle concurrently; all are released on completion.
    pub fn wait(&self) {
        self.cell.wait_for_completion();
    }

    /// The captured panic, if the job's task panicked.
    ///
    /// Returns `None` before completion as well as after a task that
    /// returned normally — calling this before `is_completed()` is defined
    /// but not useful.
    pub fn failure(&self) -> Option<TaskFailure> {
        self.cell.failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_handle_starts_incomplete() {
        let cell = CompletionCell::new();
        let handle = CompletionHandle::new(cell);
        assert!(!handle.is_completed());
        assert!(handle.failure().is_none());
    }

    #[test]
    fn test_trigger_completion_wakes_waiters() {
        let cell = CompletionCell::new();
        let handle = CompletionHandle::new(Arc::clone(&cell));

        let start = Instant::now();
        let waiter = thread::spawn(move || {
            handle.wait();
            start.elapsed()
        });

        thread::sleep(Duration::from_millis(100));
        cell.trigger_completion(None);

        let elapsed = waiter.join().unwrap();
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[test]
    fn test_trigger_completion_with_failure() {
        let cell = CompletionCell::new();
        let handle = CompletionHandle::new(Arc::clone(&cell));
        cell.trigger_completion(Some(TaskFailure::new("oops".to_string())));

        assert!(handle.is_completed());
        assert_eq!(handle.failure().unwrap().message(), "oops");
    }

    #[test]
    fn test_multiple_waiters_all_released() {
        let cell = CompletionCell::new();
        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let handle = CompletionHandle::new(Arc::clone(&cell));
                thread::spawn(move || handle.wait())
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        cell.trigger_completion(None);

        for w in waiters {
            w.join().unwrap();
        }
    }
}
