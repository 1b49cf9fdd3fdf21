//! # task-sched-core
//!
//! Platform-agnostic types for `task-sched`: the bounded queues, the
//! completion cell/handle pair, the type-erased task, and the error
//! taxonomy. No threads are spawned here — that's `task-sched`'s job.
//!
//! ## Modules
//!
//! - `task` - type-erased, panic-capturing unit of work
//! - `job` - a task bound to the completion cell its handle observes
//! - `queue` - bounded single FIFO queue (`SingleQueue`)
//! - `multi_queue` - partitioned multi-queue with work stealing (`MultiQueue`)
//! - `completion` - completion cell and the handle callers observe it through
//! - `error` - error types
//! - `tslog` - leveled, worker-aware debug printing macros
//! - `env` - environment variable utilities

#![allow(dead_code)]

pub mod completion;
pub mod env;
pub mod error;
pub mod job;
pub mod multi_queue;
pub mod queue;
pub mod task;
pub mod tslog;

pub use completion::CompletionHandle;
pub use error::{SchedError, SchedResult, TaskFailure};
pub use job::Job;
pub use multi_queue::MultiQueue;
pub use queue::SingleQueue;
pub use task::Task;
