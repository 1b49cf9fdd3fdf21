//! Bounded, thread-safe single FIFO queue
//!
//! Exclusive writer / shared reader locking discipline: `size`/`empty` take
//! a shared read lock, `push`/`pop`/`flush` take the exclusive write lock.
//! No operation blocks longer than a brief critical section — there are no
//! blocking waits inside a `SingleQueue`.

use std::collections::VecDeque;
use std::sync::RwLock;

/// Hard ceiling on `M`, matching the spec's compile-time bound.
pub const MAX_SIZE_LIMIT: usize = 8192;

/// A bounded FIFO of `T`, capacity `M` fixed at the type level.
///
/// `1 <= M <= MAX_SIZE_LIMIT` is enforced at compile time: Rust has no
/// `requires`-clause on const generics stable today, so the check is a
/// forced associated-const assertion evaluated at monomorphization, the
/// same trick `Scheduler::new` uses for its own `MAX_QUEUE_LEN` bound.
pub struct SingleQueue<T, const M: usize> {
    queue: RwLock<VecDeque<T>>,
}

impl<T, const M: usize> SingleQueue<T, M> {
    const ASSERT_CAPACITY_BOUND: () =
        assert!(M > 0 && M <= MAX_SIZE_LIMIT, "SingleQueue capacity must be in 1..=MAX_SIZE_LIMIT");

    /// Create an empty queue.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::ASSERT_CAPACITY_BOUND;
        Self { queue: RwLock::new(VecDeque::with_capacity(M)) }
    }

    /// The compile-time capacity `M`.
    #[inline]
    pub const fn max_size(&self) -> usize {
        M
    }

    /// Current number of queued elements.
    pub fn size(&self) -> usize {
        self.queue.read().unwrap().len()
    }

    /// `true` iff the queue currently holds no elements.
    pub fn empty(&self) -> bool {
        self.queue.read().unwrap().is_empty()
    }

    /// Append `x` to the back of the queue.
    ///
    /// Returns `false` without modifying the queue if it is already at
    /// capacity `M`. Never panics or blocks beyond the lock's critical
    /// section.
    pub fn push(&self, x: T) -> bool {
        let mut queue = self.queue.write().unwrap();
        if queue.len() >= M {
            return false;
        }
        queue.push_back(x);
        true
    }

    /// Remove and return the front element, or `None` if empty.
    pub fn pop(&self) -> Option<T> {
        self.queue.write().unwrap().pop_front()
    }

    /// Remove every queued element.
    pub fn flush(&self) {
        self.queue.write().unwrap().clear();
    }
}

impl<T, const M: usize> Default for SingleQueue<T, M> {
    fn default() -> Self {
        Self::new()
    }
}
