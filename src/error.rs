//! Error types for YatraNav

use thiserror::Error;

/// YatraNav error type
#[derive(Error, Debug)]
pub enum YatraError {
    /// Caller contract violation (wrong call order, double submission).
    /// These are programming errors, not runtime conditions to recover from.
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Navigation service not active after {0:.1}s")]
    ActivationTimeout(f32),

    #[error("Goal did not reach a terminal state within {0:.1}s")]
    GoalTimeout(f32),

    #[error("Navigation service error: {0}")]
    Service(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for YatraError {
    fn from(e: toml::de::Error) -> Self {
        YatraError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, YatraError>;
