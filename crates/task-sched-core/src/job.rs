//! A `Job` pairs a `Task` with the `CompletionCell` its handle observes.
//!
//! This is the element type the scheduler's `MultiQueue` actually stores:
//! queues don't know about tasks or completions individually, only about
//! the `Job` a worker eventually runs.

use std::sync::Arc;

use crate::completion::{CompletionCell, CompletionHandle};
use crate::task::Task;

/// A task bound to the completion cell a caller's handle watches.
pub struct Job {
    task: Task,
    cell: Arc<CompletionCell>,
}

impl Job {
    /// Wrap `task` in a fresh completion cell, returning the job to queue
    /// and the handle to give back to the caller that submitted it.
    pub fn new(task: Task) -> (Self, CompletionHandle) {
        let cell = CompletionCell::new();
        let handle = CompletionHandle::new(Arc::clone(&cell));
        (Self { task, cell }, handle)
    }

    /// Run the wrapped task and record its outcome on the completion cell,
    /// waking any threads blocked in `CompletionHandle::wait`.
    ///
    /// Never panics: a panicking task is caught by `Task::run` and recorded
    /// as a `TaskFailure` instead of unwinding into the worker loop.
    pub fn run(self) {
        let outcome = self.task.run();
        self.cell.trigger_completion(outcome.err());
    }

    /// Hand the task back out of a job that could not be queued.
    ///
    /// Used when a `MultiQueue::push` of a `Job` is rejected because every
    /// underlying queue is full: the caller's task must come back to them
    /// untouched, and the job's completion cell (whose handle was already
    /// discarded by the caller on the `Err` path) is simply dropped.
    pub fn into_task(self) -> Task {
        self.task
    }
}
