//! # task-sched
//!
//! Worker pool and scheduler built on top of `task-sched-core`'s queues and
//! completion cells.
//!
//! This crate provides:
//! - `SchedulerConfig` - builder-style, environment-overridable configuration
//! - `Scheduler` - the fixed worker pool that drains a `MultiQueue` of jobs
//! - the worker loop each scheduler thread runs
//!
//! Submit a task and get a handle back to observe when it finishes:
//!
//! ```
//! use task_sched::Scheduler;
//! use task_sched_core::Task;
//!
//! let scheduler = Scheduler::<256>::new(1).unwrap();
//! let handle = scheduler.schedule(Task::new(|| println!("hello"))).unwrap();
//! handle.wait();
//! assert!(handle.failure().is_none());
//! ```

#![allow(dead_code)]

pub mod config;
pub mod scheduler;
mod worker;

pub use config::SchedulerConfig;
pub use scheduler::Scheduler;

// Re-exported for callers who only depend on `task-sched`.
pub use task_sched_core::{CompletionHandle, SchedError, SchedResult, Task, TaskFailure};
