//! Problem collection for a single caching pass.
//!
//! Producers push problems through [`ProblemCollector::record`], possibly from
//! several worker threads at once. Records are appended under a lock so a
//! snapshot never observes a torn or duplicated entry; the counters are
//! bumped inside the same critical section and can be read without locking.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::problem::Problem;

/// Accumulates problems discovered during one caching pass.
#[derive(Debug, Default)]
pub struct ProblemCollector {
    problems: Mutex<Vec<Problem>>,
    errors: AtomicUsize,
    total: AtomicUsize,
    threshold_logged: AtomicBool,
}

impl ProblemCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a problem in discovery order.
    ///
    /// No deduplication happens here: multiplicity is kept so that counts
    /// reflect every report.
    pub fn record(&self, problem: Problem) {
        let is_error = problem.is_error();
        let kind = problem.kind;
        let mut problems = self.lock();
        problems.push(problem);
        if is_error {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
        let total = self.total.fetch_add(1, Ordering::Relaxed) + 1;
        drop(problems);
        debug!(%kind, total, "recorded problem");
    }

    /// Returns every problem recorded so far, in discovery order.
    pub fn snapshot(&self) -> Vec<Problem> {
        self.lock().clone()
    }

    /// Number of error problems recorded so far.
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// Number of warning problems recorded so far.
    pub fn warning_count(&self) -> usize {
        self.total_count().saturating_sub(self.error_count())
    }

    /// Number of problems recorded so far, errors and warnings alike.
    pub fn total_count(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Returns true once more than `max_problems` problems were recorded.
    ///
    /// Lets producers stop walking the graph early; the final decision is
    /// still made by [`crate::policy::decide`].
    pub fn threshold_reached(&self, max_problems: usize) -> bool {
        let total = self.total_count();
        let reached = total > max_problems;
        // Logged on the first crossing only; producers poll this in a loop.
        if reached && !self.threshold_logged.swap(true, Ordering::Relaxed) {
            debug!(max_problems, total, "problem threshold reached");
        }
        reached
    }

    /// Consumes the collector, yielding the recorded problems in order.
    pub fn into_problems(self) -> Vec<Problem> {
        self.problems
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // `record` pushes in a single call, so a poisoned lock still guards a
    // complete sequence.
    fn lock(&self) -> MutexGuard<'_, Vec<Problem>> {
        self.problems.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
