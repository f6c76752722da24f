//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid email address for {0}")]
    InvalidEmailAddress(&'static str),

    #[error("Path must start with '/': {0}")]
    InvalidPath(&'static str),

    #[error("Roster path is empty")]
    MissingRosterPath,

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("Scoring weight specialty_match must be positive")]
    ZeroSpecialtyWeight,
}
