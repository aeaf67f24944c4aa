//! # ServiceError
//!
//! Failures of the command handlers. Each one stays local to the command
//! that raised it.

use domains::{GatewayError, SessionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// A vote was attempted without a logged-in user.
    #[error("Please login to vote")]
    Unauthenticated,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A specialized Result type for command handlers.
pub type Result<T> = std::result::Result<T, ServiceError>;
