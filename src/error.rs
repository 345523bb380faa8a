//! Configuration errors.

use thiserror::Error;

/// Errors raised while assembling or configuring a search.
///
/// Every variant is a construction-time failure: a value of the
/// requested type is never returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("required component `{0}` was not supplied")]
    MissingComponent(&'static str),

    #[error("refinement stage must be configured with the same problem instance as the engine")]
    ProblemMismatch,

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
