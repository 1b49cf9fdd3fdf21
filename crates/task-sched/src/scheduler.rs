//! The simple scheduler: a fixed worker pool draining a `MultiQueue` of jobs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use task_sched_core::completion::CompletionHandle;
use task_sched_core::error::{SchedError, SchedResult};
use task_sched_core::job::Job;
use task_sched_core::multi_queue::MultiQueue;
use task_sched_core::task::Task;
use task_sched_core::tsinfo;

use crate::config::SchedulerConfig;
use crate::worker::{self, IdleWait};

/// Owns a fixed pool of worker threads draining a partitioned queue of
/// jobs. `MAX_QUEUE_LEN` is the compile-time capacity of each worker's
/// underlying single queue (spec.md's `Max`, which must be `< 8192`).
pub struct Scheduler<const MAX_QUEUE_LEN: usize> {
    queue: Arc<MultiQueue<Job, MAX_QUEUE_LEN>>,
    idle: Arc<IdleWait>,
    stop: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
    num_executors: usize,
}

impl<const MAX_QUEUE_LEN: usize> Scheduler<MAX_QUEUE_LEN> {
    const ASSERT_MAX_QUEUE_LEN_BOUND: () =
        assert!(MAX_QUEUE_LEN > 0 && MAX_QUEUE_LEN < 8192, "MaxQueueLength must be in 1..8192");

    /// Build a scheduler with `num_executors` worker threads, each backed
    /// by a queue of capacity `MAX_QUEUE_LEN`.
    ///
    /// Spawns every worker and blocks on a start barrier before returning,
    /// so no `schedule` call can race with an unborn worker.
    ///
    /// # Errors
    ///
    /// `SchedError::TooFewExecutors` if `num_executors == 0`.
    /// `SchedError::TooManyExecutors` if `num_executors` exceeds
    /// `std::thread::available_parallelism()`.
    pub fn new(num_executors: usize) -> SchedResult<Self> {
        #[allow(clippy::let_unit_value)]
        let _ = Self::ASSERT_MAX_QUEUE_LEN_BOUND;

        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        if num_executors == 0 {
            return Err(SchedError::TooFewExecutors);
        }
        if num_executors > available {
            return Err(SchedError::TooManyExecutors { requested: num_executors, available });
        }

        let queue = Arc::new(MultiQueue::new(num_executors)?);
        let idle: Arc<IdleWait> = Arc::new((Mutex::new(()), Condvar::new()));
        let stop = Arc::new(AtomicBool::new(false));
        let barrier = Arc::new(Barrier::new(num_executors + 1));

        let workers = (0..num_executors)
            .map(|id| {
                let queue = Arc::clone(&queue);
                let idle = Arc::clone(&idle);
                let stop = Arc::clone(&stop);
                let barrier = Arc::clone(&barrier);
                thread::Builder::new()
                    .name(format!("task-sched-worker-{id}"))
                    .spawn(move || {
                        barrier.wait();
                        worker::run(id, queue, idle, stop);
                    })
                    .expect("failed to spawn scheduler worker thread")
            })
            .collect();

        barrier.wait();
        tsinfo!("scheduler started with {num_executors} workers, max_queue_len={MAX_QUEUE_LEN}");

        Ok(Self { queue, idle, stop, workers, num_executors })
    }

    /// Build a scheduler from a [`SchedulerConfig`], applying its debug
    /// logging setting before starting workers.
    pub fn from_config(config: SchedulerConfig) -> SchedResult<Self> {
        config.validate()?;
        config.apply_logging();
        Self::new(config.num_executors)
    }

    /// Number of worker threads this scheduler owns.
    pub fn num_executors(&self) -> usize {
        self.num_executors
    }

    /// Submit a task for execution.
    ///
    /// On success, wakes one idle worker and returns a handle observing the
    /// job's completion. If every worker's queue is full, the task is
    /// handed back to the caller untouched and no worker is woken.
    ///
    /// Submission never blocks.
    pub fn schedule(&self, task: Task) -> Result<CompletionHandle, Task> {
        let (job, handle) = Job::new(task);
        match self.queue.push(job) {
            Ok(()) => {
                self.idle.1.notify_one();
                Ok(handle)
            }
            Err(job) => Err(job.into_task()),
        }
    }

    /// Drop every queued-but-unstarted job. Running tasks are not
    /// interrupted. Handles for flushed jobs never complete and will block
    /// forever on `wait()` — `flush` is a teardown operation, not a
    /// cancellation mechanism.
    pub fn flush(&self) {
        self.queue.flush();
    }
}

impl<const MAX_QUEUE_LEN: usize> Drop for Scheduler<MAX_QUEUE_LEN> {
    /// Stop every worker and join them. In-flight tasks run to completion;
    /// queued-but-unstarted jobs are dropped without ever completing their
    /// handles.
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        {
            let _guard = self.idle.0.lock().unwrap();
            self.idle.1.notify_all();
        }
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        tsinfo!("scheduler stopped");
    }
}
