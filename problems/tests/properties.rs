//! Property-based tests for the outcome policy and failure construction.

use std::collections::HashSet;
use std::io;

use proptest::prelude::*;
use statecache_problems::{decide, AggregatedFailure, FailureKind, Outcome, Problem, ProblemKind};

fn arb_problem() -> impl Strategy<Value = Problem> {
    (any::<bool>(), 0u8..8, any::<bool>()).prop_map(|(is_error, id, with_cause)| {
        let kind = if is_error {
            ProblemKind::Error
        } else {
            ProblemKind::Warning
        };
        let problem = Problem::new(kind, format!("problem {id}"));
        if with_cause {
            problem.with_cause(io::Error::new(io::ErrorKind::Other, format!("cause {id}")))
        } else {
            problem
        }
    })
}

fn arb_warnings() -> impl Strategy<Value = Vec<Problem>> {
    prop::collection::vec(
        (0u8..16).prop_map(|id| Problem::warning(format!("warning {id}"))),
        1..32,
    )
}

proptest! {
    /// Any error fails the pass regardless of configuration.
    #[test]
    fn prop_errors_always_win(
        mut problems in prop::collection::vec(arb_problem(), 0..24),
        at in any::<prop::sample::Index>(),
        max_problems in 1usize..64,
        fail_on_problems: bool,
    ) {
        let index = at.index(problems.len() + 1);
        problems.insert(index, Problem::new(ProblemKind::Error, "forced error"));

        let outcome = decide(&problems, max_problems, fail_on_problems);
        prop_assert_eq!(outcome.failure_kind(), Some(FailureKind::Errors));
    }

    /// Warnings over the threshold fail on volume.
    #[test]
    fn prop_threshold_exceeded(problems in arb_warnings(), fail_on_problems: bool) {
        let max_problems = problems.len() - 1;
        prop_assume!(max_problems > 0);

        let outcome = decide(&problems, max_problems, fail_on_problems);
        prop_assert_eq!(outcome.failure_kind(), Some(FailureKind::Threshold));
    }

    /// Warnings within the threshold fail only under strict mode.
    #[test]
    fn prop_strict_within_threshold(problems in arb_warnings(), slack in 0usize..8) {
        let max_problems = problems.len() + slack;

        let strict = decide(&problems, max_problems, true);
        prop_assert_eq!(strict.failure_kind(), Some(FailureKind::Strict));
        prop_assert!(decide(&problems, max_problems, false).is_success());
    }

    /// Nothing recorded is always a success.
    #[test]
    fn prop_empty_succeeds(max_problems in 1usize..1024, fail_on_problems: bool) {
        prop_assert_eq!(decide(&[], max_problems, fail_on_problems), Outcome::Success);
    }

    /// Causes are unique by description, first occurrence kept, errors included.
    #[test]
    fn prop_causes_unique_by_description(
        problems in prop::collection::vec(arb_problem(), 1..32),
        fail_on_problems: bool,
    ) {
        let outcome = decide(&problems, 4, fail_on_problems);
        let kind = outcome.failure_kind();
        let Some(failure) = AggregatedFailure::from_outcome(outcome, &problems) else {
            prop_assert_eq!(kind, None);
            return Ok(());
        };

        let mut seen = HashSet::new();
        let expected: Vec<String> = problems
            .iter()
            .filter(|p| failure.kind() != FailureKind::Errors || p.is_error())
            .filter(|p| seen.insert(p.description.clone()))
            .filter_map(|p| p.cause.as_ref().map(ToString::to_string))
            .collect();
        let actual: Vec<String> = failure.causes().iter().map(ToString::to_string).collect();
        prop_assert_eq!(actual, expected);

        for problem in problems.iter().filter(|p| p.is_error()) {
            let line = format!("- {}", problem.description);
            prop_assert!(failure.summary().lines().any(|l| l == line));
        }
    }
}
