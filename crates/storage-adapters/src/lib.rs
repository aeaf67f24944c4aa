//! # storage-adapters
//!
//! `SessionStore` implementations holding the Gateway bearer token.

pub mod memory;
#[cfg(feature = "session-file")]
pub mod file;

pub use memory::MemorySessionStore;
#[cfg(feature = "session-file")]
pub use file::FileSessionStore;
