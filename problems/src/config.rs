//! Problem-policy configuration.
//!
//! Resolved once before a pass starts, from a TOML file and/or operator
//! overrides, then threaded into [`crate::policy::decide`] as plain values.
//!
//! ```toml
//! max-problems = 100
//! fail-on-problems = true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

/// Name of the problem threshold option.
pub const MAX_PROBLEMS: &str = "max-problems";

/// Name of the strict-mode option.
pub const FAIL_ON_PROBLEMS: &str = "fail-on-problems";

/// Threshold used when none is configured.
pub const DEFAULT_MAX_PROBLEMS: usize = 512;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `max-problems` is zero or not an integer.
    #[error("invalid value for max-problems: `{0}` (expected a positive integer)")]
    InvalidMaxProblems(String),

    /// A boolean option is neither `true` nor `false`.
    #[error("invalid value for {name}: `{value}` (expected `true` or `false`)")]
    InvalidFlag {
        /// Option name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Policy options for a caching pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProblemsConfig {
    /// Fail once more than this many problems were recorded.
    pub max_problems: usize,
    /// Fail on any problem, warnings included.
    pub fail_on_problems: bool,
}

impl Default for ProblemsConfig {
    fn default() -> Self {
        Self {
            max_problems: DEFAULT_MAX_PROBLEMS,
            fail_on_problems: false,
        }
    }
}

impl ProblemsConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML, names an unknown
    /// option, or sets `max-problems` to zero.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("malformed problems configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
    }

    /// Applies operator overrides given as `name=value` pairs.
    ///
    /// Names other than [`MAX_PROBLEMS`] and [`FAIL_ON_PROBLEMS`] belong to
    /// other subsystems and are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a recognised option has a malformed value.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in overrides {
            let value = value.as_ref().trim();
            match name.as_ref() {
                MAX_PROBLEMS => {
                    self.max_problems = value
                        .parse()
                        .map_err(|_| ConfigError::InvalidMaxProblems(value.to_string()))?;
                }
                FAIL_ON_PROBLEMS => {
                    self.fail_on_problems =
                        value.parse().map_err(|_| ConfigError::InvalidFlag {
                            name: FAIL_ON_PROBLEMS,
                            value: value.to_string(),
                        })?;
                }
                _ => {}
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that the threshold is positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaxProblems`] for a zero threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_problems == 0 {
            return Err(ConfigError::InvalidMaxProblems("0".to_string()));
        }
        Ok(())
    }
}
