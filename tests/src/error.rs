//! Error types for the scenario framework.

use femcat_session::RegistryError;
use thiserror::Error;

/// Result type for scenario runs.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    /// An error pattern in an assertion does not compile.
    #[error("invalid error pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The scenario's session could not be built from its configuration.
    #[error("session setup failed for scenario '{scenario}': {source}")]
    Setup {
        scenario: String,
        source: RegistryError,
    },
}

impl ScenarioError {
    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
