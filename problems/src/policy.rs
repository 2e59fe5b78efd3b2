//! Outcome policy: turns the problems of a finished pass into a decision.
//!
//! Precedence is fixed: errors, then the problem threshold, then the strict
//! flag, then success. Configuration never downgrades an error.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::problem::Problem;

/// Why a pass failed. Each kind owns its message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// At least one error problem was recorded.
    Errors,
    /// More problems than `max-problems` were recorded.
    Threshold,
    /// Problems were recorded while `fail-on-problems` is enabled.
    Strict,
}

impl FailureKind {
    /// First line of the failure message.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Errors => "State could not be cached.",
            Self::Threshold => "Maximum number of problems has been reached.",
            Self::Strict => "Problems found while caching state.",
        }
    }

    /// Trailing line naming the option that controls this failure, if any.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::Errors => None,
            Self::Threshold => Some(
                "This behavior can be adjusted via the max-problems configuration option.",
            ),
            Self::Strict => Some("Failing because the fail-on-problems option is enabled."),
        }
    }

    /// Renders the full message with `summary` embedded.
    pub fn message(self, summary: &str) -> String {
        let mut message = format!("{}\n{}", self.headline(), summary);
        if let Some(hint) = self.hint() {
            message.push('\n');
            message.push_str(hint);
        }
        message
    }

    /// Returns true if `problem` is carried as a cause for this kind.
    pub fn selects(self, problem: &Problem) -> bool {
        match self {
            Self::Errors => problem.is_error(),
            Self::Threshold | Self::Strict => true,
        }
    }
}

/// Decided result of a caching pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Success,
    /// The pass failed.
    Failure {
        /// Which condition failed the pass.
        kind: FailureKind,
        /// One `- <description>` line per distinct problem.
        summary: String,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the failure kind, if the pass failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Decides the outcome of a pass.
///
/// Pure apart from logging: no I/O, cannot fail.
pub fn decide(problems: &[Problem], max_problems: usize, fail_on_problems: bool) -> Outcome {
    let kind = if problems.iter().any(Problem::is_error) {
        Some(FailureKind::Errors)
    } else if problems.len() > max_problems {
        Some(FailureKind::Threshold)
    } else if fail_on_problems && !problems.is_empty() {
        Some(FailureKind::Strict)
    } else {
        None
    };

    match kind {
        None => {
            info!(warnings = problems.len(), "caching pass succeeded");
            Outcome::Success
        }
        Some(kind) => {
            let summary = summarize(problems);
            warn!(
                ?kind,
                total = problems.len(),
                distinct = summary.lines().count(),
                "caching pass failed"
            );
            Outcome::Failure { kind, summary }
        }
    }
}

/// Lists distinct problem descriptions in first-occurrence order.
pub fn summarize(problems: &[Problem]) -> String {
    distinct(problems.iter())
        .map(|p| format!("- {}", p.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Yields the first problem for each description, preserving order.
pub(crate) fn distinct<'a>(
    problems: impl Iterator<Item = &'a Problem>,
) -> impl Iterator<Item = &'a Problem> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    problems.filter(move |p: &&'a Problem| {
        let problem: &'a Problem = *p;
        seen.insert(problem.description.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warnings(descriptions: &[&str]) -> Vec<Problem> {
        descriptions.iter().map(|d| Problem::warning(*d)).collect()
    }

    #[test]
    fn empty_is_success_under_any_flags() {
        assert_eq!(decide(&[], 1, true), Outcome::Success);
        assert_eq!(decide(&[], 512, false), Outcome::Success);
    }

    #[test]
    fn errors_take_precedence() {
        let mut problems = warnings(&["W1", "W2", "W3"]);
        problems.push(Problem::new(crate::ProblemKind::Error, "E1"));

        let outcome = decide(&problems, 1, true);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Errors));
    }

    #[test]
    fn threshold_beats_strict() {
        let outcome = decide(&warnings(&["a", "b", "c"]), 2, true);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Threshold));
    }

    #[test]
    fn at_threshold_without_strict_succeeds() {
        assert!(decide(&warnings(&["a", "b"]), 2, false).is_success());
    }

    #[test]
    fn strict_fails_on_single_warning() {
        let outcome = decide(&warnings(&["a"]), 10, true);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Strict));
    }

    #[test]
    fn summary_lists_distinct_descriptions_in_order() {
        let summary = summarize(&warnings(&["b", "a", "b", "c", "a"]));
        assert_eq!(summary, "- b\n- a\n- c");
    }

    #[test]
    fn message_templates() {
        assert_eq!(
            FailureKind::Threshold.message("- a"),
            "Maximum number of problems has been reached.\n- a\n\
             This behavior can be adjusted via the max-problems configuration option."
        );
        assert_eq!(
            FailureKind::Strict.message("- a"),
            "Problems found while caching state.\n- a\n\
             Failing because the fail-on-problems option is enabled."
        );
        assert_eq!(
            FailureKind::Errors.message("- a"),
            "State could not be cached.\n- a"
        );
    }
}
