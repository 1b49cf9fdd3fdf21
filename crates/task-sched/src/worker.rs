//! Worker thread loop
//!
//! A worker repeatedly pops its own queue, falling back to work-stealing
//! from its neighbors via `MultiQueue::pop`, and parks on the scheduler's
//! idle condvar when it finds nothing to run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use task_sched_core::{tsdebug, tsinfo};
use task_sched_core::job::Job;
use task_sched_core::multi_queue::MultiQueue;
use task_sched_core::tslog;

/// Idle-wake primitive shared by every worker and by `Scheduler::schedule`.
///
/// Separate from `MultiQueue`'s internal producer cursor mutex: this one
/// only gates "wake a sleeping worker", never queue state.
pub(crate) type IdleWait = (Mutex<()>, Condvar);

/// Run worker `id`'s loop until `stop` is set.
///
/// Mirrors spec.md's pseudocode exactly: check `stop` at the top of the
/// loop, try to pop (own queue first, then steal round-robin), and only
/// park on the idle condvar when a pop finds nothing. Spurious/lost
/// wakeups are handled by `wait_while`'s predicate re-check, not by the
/// caller.
pub(crate) fn run<const MAX_QUEUE_LEN: usize>(
    id: usize,
    queue: Arc<MultiQueue<Job, MAX_QUEUE_LEN>>,
    idle: Arc<IdleWait>,
    stop: Arc<AtomicBool>,
) {
    tslog::set_worker_id(id as u32);
    tsinfo!("worker started");

    loop {
        if stop.load(Ordering::Acquire) {
            break;
        }

        match queue.pop(id).expect("worker id is within the multi-queue's range") {
            Some(job) => {
                tsdebug!("picked up job");
                job.run();
            }
            None => {
                let (mutex, condvar) = &*idle;
                let guard = mutex.lock().unwrap();
                let _guard = condvar
                    .wait_while(guard, |_| queue.empty() && !stop.load(Ordering::Acquire))
                    .unwrap();
            }
        }
    }

    tsinfo!("worker stopped");
    tslog::clear_worker_id();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread;
    use task_sched_core::task::Task;

    #[test]
    fn test_worker_drains_own_queue_and_stops() {
        let queue: Arc<MultiQueue<Job, 8>> = Arc::new(MultiQueue::new(1).unwrap());
        let idle: Arc<IdleWait> = Arc::new((Mutex::new(()), Condvar::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let ran = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let ran = Arc::clone(&ran);
            let (job, _handle) = Job::new(Task::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            }));
            queue.push(job).map_err(|_| ()).unwrap();
        }

        let worker_queue = Arc::clone(&queue);
        let worker_idle = Arc::clone(&idle);
        let worker_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || run(0, worker_queue, worker_idle, worker_stop));

        // Wait for the queue to drain, then stop the worker.
        while !queue.empty() {
            thread::yield_now();
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
        stop.store(true, Ordering::Release);
        idle.1.notify_all();
        handle.join().unwrap();

        assert_eq!(ran.load(Ordering::SeqCst), 3);
    }
}
