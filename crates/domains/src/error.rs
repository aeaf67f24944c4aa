//! # Port Errors
//!
//! Failures reported by adapters across the port boundary.

use thiserror::Error;

/// Errors raised by a [`ForumGateway`](crate::ports::ForumGateway).
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The Gateway answered with a non-`success` status.
    ///
    /// Displays the server's message verbatim so it can be shown to the user.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// The response body did not match the expected envelope.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The request could not be built, e.g. an id that is not a path segment.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The stored access credential could not be read.
    #[error("credential unavailable: {0}")]
    Credential(#[from] SessionError),
}

/// Errors raised by a [`SessionStore`](crate::ports::SessionStore).
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}
