//! Error types for the MailNuggets client.

use thiserror::Error;

/// Errors that can occur during MailNuggets operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The client could not be configured (missing credential, bad endpoint, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A request parameter was missing or malformed. Raised before any network I/O.
    #[error("invalid {operation} request: {reason}")]
    Validation {
        /// Operation the request was built for.
        operation: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// DNS, connect, TLS, or timeout failure. Never retried by this crate.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an `<errors>` document.
    ///
    /// Only produced by [`Response::error_for_remote`](crate::Response::error_for_remote).
    #[error("MailNuggets returned an error document: {body}")]
    Remote {
        /// The unmodified response body.
        body: String,
    },

    /// The response body is not valid UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    pub(crate) fn validation(operation: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            operation,
            reason: reason.into(),
        }
    }

    /// Whether this error was raised locally before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Whether this error came from the HTTP transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
