//! forum-client/crates/domains/src/lib.rs
//!
//! Entities, vote rules and port definitions shared by every other crate.

pub mod error;
pub mod models;
pub mod ports;
pub mod votes;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
pub use votes::*;
