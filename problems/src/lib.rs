//! Problem aggregation for build-state caching.
//!
//! A caching pass serializes a property or task graph and may run into many
//! independent problems along the way. This crate collects them, decides
//! under the configured policy whether the pass fails, and builds a single
//! failure value that keeps every distinct underlying cause.
//!
//! # Decision
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | any error recorded | [`FailureKind::Errors`] |
//! | more than `max-problems` problems | [`FailureKind::Threshold`] |
//! | any problem with `fail-on-problems` | [`FailureKind::Strict`] |
//! | otherwise | [`Outcome::Success`] |
//!
//! Rows are checked top to bottom; the first match wins.
//!
//! # Entry Point
//!
//! ```
//! use statecache_problems::{CachingPass, FailureKind, Problem, ProblemsConfig};
//!
//! let pass = CachingPass::new(ProblemsConfig::default())?;
//! pass.collector().record(Problem::warning("field `lock` of task `:compile`"));
//! pass.collector().record(Problem::error(
//!     "field `out` of task `:jar`",
//!     std::io::Error::new(std::io::ErrorKind::Other, "stream closed"),
//! ));
//!
//! let failure = pass.finish().unwrap_err();
//! assert_eq!(failure.kind(), FailureKind::Errors);
//! assert_eq!(failure.causes().len(), 1);
//! # Ok::<(), statecache_problems::ConfigError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod collector;
pub mod config;
pub mod failure;
pub mod pass;
pub mod policy;
pub mod problem;

pub use collector::ProblemCollector;
pub use config::{ConfigError, ProblemsConfig};
pub use failure::AggregatedFailure;
pub use pass::CachingPass;
pub use policy::{decide, summarize, FailureKind, Outcome};
pub use problem::{Cause, Problem, ProblemKind};
