//! Error types for the SIPS lookup service.
//!
//! Configuration problems and upstream (portal) failures are kept apart so the
//! handler can report them distinctly. A CUPS with no data is not an error at
//! all; see [`crate::model::LookupOutcome`].

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// SIPS portal communication errors
    #[error("SIPS upstream error: {0}")]
    Sips(#[from] SipsError),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Required configuration value is missing
    #[error("missing required configuration: {0}")]
    Missing(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised while talking to the SIPS portal.
#[derive(Error, Debug)]
pub enum SipsError {
    /// HTTP request failed (connection, body read, per-request timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Portal returned a status outside the accepted range
    #[error("unexpected response status {status} from {url}")]
    Status { status: u16, url: String },

    /// A portal URL could not be built or resolved
    #[error("invalid portal URL: {0}")]
    Url(#[from] url::ParseError),

    /// The whole lookup exceeded its deadline
    #[error("lookup timed out after {0} seconds")]
    Timeout(u64),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SipsError {
    /// Creates a status error for the given response status and URL.
    pub fn status(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            url: url.into(),
        }
    }
}
