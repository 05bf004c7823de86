//! Common error types for shipcheck.

use thiserror::Error;

/// Common error type for shipcheck operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("property list error: {0}")]
    Plist(#[from] plist::Error),

    #[error("Command execution failed: {cmd} - {reason}")]
    CommandExecution { cmd: String, reason: String },

    #[error("Command timed out: {cmd}")]
    CommandTimeout { cmd: String },

    #[error("Refusing unsafe argument: {0}")]
    UnsafeArgument(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}
