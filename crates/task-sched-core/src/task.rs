//! Type-erased, move-only, nullary work unit
//!
//! A `Task` wraps any `FnOnce() + Send + 'static` closure. It is the
//! scheduler's unit of work: producers hand one in, a worker eventually
//! calls `run()` on it exactly once.

use core::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::TaskFailure;

/// A boxed, nullary, move-only unit of work.
///
/// `Box<dyn FnOnce() + Send>` is already move-only and has no useful
/// "empty" state to speak of, so unlike a type-erased wrapper in a language
/// without ownership moves, `Task` needs no null state of its own: a
/// `Task` you hold is always live, and a `Scheduler::schedule` that can't
/// accept it simply hands the same `Task` back to you (see
/// `Scheduler::schedule`'s `Result<CompletionHandle, Task>` return type).
pub struct Task {
    body: Box<dyn FnOnce() + Send + 'static>,
}

// `Box<dyn FnOnce() + Send>` is not `Sync` by default — a trait object's
// auto traits follow only its declared bounds, and a captured closure may
// hold `!Sync` state. That default is overly conservative here: a `Task`
// is always moved into exactly one worker and consumed by value inside
// `run`; nothing ever takes a `&Task` from two threads at once. The bound
// is only needed so `MultiQueue<Job, M>` (holding `Task`s behind a shared
// `RwLock`) is itself `Sync` and can live in an `Arc` shared by the
// scheduler's workers.
unsafe impl Sync for Task {}

impl Task {
    /// Wrap a closure as a task.
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self { body: Box::new(body) }
    }

    /// Invoke the task, capturing a panic instead of letting it unwind past
    /// the caller.
    ///
    /// Returns `Ok(())` if the task ran to completion, or
    /// `Err(TaskFailure)` with the captured panic message if it panicked.
    pub fn run(self) -> Result<(), TaskFailure> {
        panic::catch_unwind(AssertUnwindSafe(self.body)).map_err(|payload| {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_string()
            };
            TaskFailure::new(message)
        })
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_task_runs_once() {
        let ran = Arc::new(AtomicBool::new(false));
        let ran2 = Arc::clone(&ran);
        let task = Task::new(move || ran2.store(true, Ordering::SeqCst));
        assert!(task.run().is_ok());
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_task_captures_str_panic() {
        let task = Task::new(|| panic!("boom"));
        let err = task.run().unwrap_err();
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn test_task_captures_string_panic() {
        let task = Task::new(|| panic!("{}", "dynamic".to_string()));
        let err = task.run().unwrap_err();
        assert_eq!(err.message(), "dynamic");
    }
}
