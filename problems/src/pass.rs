//! Caching pass lifecycle: collect, decide once, then succeed or fail.

use tracing::debug;

use crate::collector::ProblemCollector;
use crate::config::{ConfigError, ProblemsConfig};
use crate::failure::AggregatedFailure;
use crate::policy::decide;

/// One serialization pass and the problems it discovers.
///
/// Producers record through [`CachingPass::collector`]. [`CachingPass::finish`]
/// consumes the pass, so the decision happens exactly once and nothing of the
/// collection phase outlives it.
#[derive(Debug)]
pub struct CachingPass {
    config: ProblemsConfig,
    collector: ProblemCollector,
}

impl CachingPass {
    /// Starts collecting under `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not validate, so a zero
    /// threshold never reaches the decision.
    pub fn new(config: ProblemsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            max_problems = config.max_problems,
            fail_on_problems = config.fail_on_problems,
            "caching pass started"
        );
        Ok(Self {
            config,
            collector: ProblemCollector::new(),
        })
    }

    /// Policy in effect for this pass.
    pub fn config(&self) -> &ProblemsConfig {
        &self.config
    }

    /// Entry point for producers; safe to share across worker threads.
    pub fn collector(&self) -> &ProblemCollector {
        &self.collector
    }

    /// Returns true once the configured threshold has been exceeded.
    pub fn threshold_reached(&self) -> bool {
        self.collector.threshold_reached(self.config.max_problems)
    }

    /// Ends collection and decides the outcome.
    ///
    /// # Errors
    ///
    /// Returns the [`AggregatedFailure`] for any failing outcome.
    pub fn finish(self) -> Result<(), AggregatedFailure> {
        let problems = self.collector.into_problems();
        let outcome = decide(
            &problems,
            self.config.max_problems,
            self.config.fail_on_problems,
        );
        match AggregatedFailure::from_outcome(outcome, &problems) {
            None => Ok(()),
            Some(failure) => Err(failure),
        }
    }
}
