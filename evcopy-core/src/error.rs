//! Error types for evcopy.

use thiserror::Error;

/// Errors that can occur while talking to the events API or handling local state.
#[derive(Error, Debug)]
pub enum EvCopyError {
    /// The remote rejected the credentials (HTTP 401).
    #[error("Authentication failed: invalid username or password")]
    Auth,

    /// A read request came back with a non-2xx status other than 401.
    #[error("Failed to fetch from events API: {status}")]
    Fetch { status: u16 },

    #[error("{0}")]
    Create(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body did not match the expected shape.
    #[error("Unexpected response from events API: {0}")]
    Schema(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for EvCopyError {
    fn from(e: reqwest::Error) -> Self {
        EvCopyError::Network(e.to_string())
    }
}

/// Result type alias for evcopy operations.
pub type EvCopyResult<T> = Result<T, EvCopyError>;
