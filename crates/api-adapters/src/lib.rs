//! forum-client/crates/api-adapters/src/lib.rs
//!
//! Outbound adapters for the remote forum Gateway.

pub mod envelope;

#[cfg(feature = "http-reqwest")]
pub mod http_gateway;

#[cfg(feature = "http-reqwest")]
pub use http_gateway::{HttpGateway, DEFAULT_BASE_URL};
