//! forum-client/crates/services/src/lib.rs
//!
//! The client-side state core: actions, pure reducers, the store that owns
//! the state tree, and the command handlers that keep it in step with the
//! remote Gateway (including optimistic votes with rollback).

pub mod actions;
pub mod categories;
pub mod error;
pub mod reducers;
pub mod selectors;
pub mod service;
pub mod state;
pub mod store;

pub use actions::{Action, CommentVote, ThreadVote};
pub use categories::derive_categories;
pub use error::{Result, ServiceError};
pub use service::{ForumService, VoteIntent, VotePlan, VoteTarget};
pub use state::{AuthState, LeaderboardState, RootState, ThreadsState, UsersState};
pub use store::Store;
