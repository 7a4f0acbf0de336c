use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Counts dispatched jobs that have not finished yet.
///
/// Every job holds a [`PendingGuard`]; dropping the guard settles the job, so
/// a job is counted down exactly once whether it succeeded, failed, was
/// cancelled or unwound.
///
/// ```
/// use engine::CompletionTracker;
/// use std::sync::Arc;
///
/// let tracker = Arc::new(CompletionTracker::new());
/// let guard = tracker.register();
/// assert_eq!(tracker.pending(), 1);
///
/// let waiter = {
///     let tracker = Arc::clone(&tracker);
///     std::thread::spawn(move || tracker.wait())
/// };
/// drop(guard);
/// waiter.join().unwrap();
/// assert_eq!(tracker.pending(), 0);
/// ```
#[derive(Debug, Default)]
pub struct CompletionTracker {
    pending: Mutex<usize>,
    drained: Condvar,
}

impl CompletionTracker {
    /// Creates a tracker with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one job.
    pub fn register(self: &Arc<Self>) -> PendingGuard {
        *self.lock() += 1;
        PendingGuard {
            tracker: Arc::clone(self),
        }
    }

    /// Number of registered jobs not yet settled.
    #[must_use]
    pub fn pending(&self) -> usize {
        *self.lock()
    }

    /// Blocks until every registered job has settled.
    pub fn wait(&self) {
        let mut pending = self.lock();
        while *pending > 0 {
            pending = self
                .drained
                .wait(pending)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn settle(&self) {
        let mut pending = self.lock();
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            self.drained.notify_all();
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registration of one job with a [`CompletionTracker`].
#[must_use = "dropping the guard settles the job immediately"]
pub struct PendingGuard {
    tracker: Arc<CompletionTracker>,
}

impl fmt::Debug for PendingGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingGuard").finish_non_exhaustive()
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.tracker.settle();
    }
}
