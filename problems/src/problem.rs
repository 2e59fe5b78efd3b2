//! Problem data model: what a serializer reports while caching build state.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// An underlying failure attached to a problem.
///
/// Shared by reference count so that snapshots and the aggregated failure can
/// hand out the same cause without cloning the error itself.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Severity of a reported problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// The state could not be serialized correctly.
    Error,
    /// The state was serialized, but something about it is questionable.
    Warning,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// A single issue discovered while serializing a property or task graph.
#[derive(Debug, Clone)]
pub struct Problem {
    /// Severity of the problem.
    pub kind: ProblemKind,
    /// Human-readable description; also the deduplication key.
    pub description: String,
    /// Optional underlying failure.
    pub cause: Option<Cause>,
}

impl Problem {
    /// Creates a problem without a cause.
    pub fn new(kind: ProblemKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            cause: None,
        }
    }

    /// Creates an error problem carrying the failure that produced it.
    pub fn error<E>(description: impl Into<String>, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::new(ProblemKind::Error, description).with_cause(cause)
    }

    /// Creates a warning problem without a cause.
    pub fn warning(description: impl Into<String>) -> Self {
        Self::new(ProblemKind::Warning, description)
    }

    /// Attaches (or replaces) the underlying failure.
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Returns true if this problem is an error.
    pub fn is_error(&self) -> bool {
        self.kind == ProblemKind::Error
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}
