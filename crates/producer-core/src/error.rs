//! Error types for producer.

use thiserror::Error;

/// Main error type for producer operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration is missing or malformed (including unusable origins)
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(String),

    /// Remote answered with a non-success status
    #[error("HTTP status {status}: {message}")]
    Status { status: u16, message: String },

    /// Remote accepted the request but the response lacks the success marker
    #[error("API error: {0}")]
    Api(String),

    /// Local repository operation failed
    #[error("Repository error: {0}")]
    Repo(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was raised by the HTTP transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. })
    }
}

/// Result type alias for producer operations.
pub type Result<T> = std::result::Result<T, Error>;
