//! The single failure value surfaced for a failed caching pass.

use std::error::Error;
use std::fmt;

use crate::policy::{self, FailureKind, Outcome};
use crate::problem::{Cause, Problem};

/// Aggregated failure of a caching pass.
///
/// Carries the rendered message, the problem summary, and every distinct
/// underlying cause. Causes stay separate so callers can report the message
/// and then walk each cause on its own.
#[derive(Debug, Clone)]
pub struct AggregatedFailure {
    kind: FailureKind,
    message: String,
    summary: String,
    causes: Vec<Cause>,
}

impl AggregatedFailure {
    /// Builds the failure for `outcome`, or `None` if the pass succeeded.
    ///
    /// `problems` must be the sequence the outcome was decided from.
    pub fn from_outcome(outcome: Outcome, problems: &[Problem]) -> Option<Self> {
        match outcome {
            Outcome::Success => None,
            Outcome::Failure { kind, summary } => Some(Self::new(kind, summary, problems)),
        }
    }

    fn new(kind: FailureKind, summary: String, problems: &[Problem]) -> Self {
        let selected = problems.iter().filter(|p| kind.selects(p));
        let causes = policy::distinct(selected)
            .filter_map(|p| p.cause.clone())
            .collect();

        Self {
            kind,
            message: kind.message(&summary),
            summary,
            causes,
        }
    }

    /// Which condition failed the pass.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Top-level message, summary included.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// One line per distinct problem.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Underlying failures, one per distinct description, in discovery order.
    pub fn causes(&self) -> &[Cause] {
        &self.causes
    }
}

impl fmt::Display for AggregatedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for AggregatedFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.causes
            .first()
            .map(|cause| &**cause as &(dyn Error + 'static))
    }
}
