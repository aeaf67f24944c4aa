//! # Ports
//!
//! Adapters implement these traits; the state core only ever talks to them.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::{GatewayError, SessionError};
use crate::models::{
    Comment, Credentials, LeaderboardEntry, NewThread, Registration, Thread, ThreadDetail, User,
    Vote,
};

/// The remote forum API.
///
/// Authenticated calls pick up the current credential themselves; callers
/// never pass tokens around.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ForumGateway: Send + Sync {
    // Auth
    async fn register(&self, registration: &Registration) -> Result<User, GatewayError>;
    /// Returns the bearer token for the account.
    async fn login(&self, credentials: &Credentials) -> Result<String, GatewayError>;
    async fn get_own_profile(&self) -> Result<User, GatewayError>;

    // Users
    async fn get_all_users(&self) -> Result<Vec<User>, GatewayError>;

    // Threads
    async fn get_all_threads(&self) -> Result<Vec<Thread>, GatewayError>;
    async fn get_thread_detail(&self, thread_id: &str) -> Result<ThreadDetail, GatewayError>;
    async fn create_thread(&self, thread: &NewThread) -> Result<Thread, GatewayError>;

    // Comments
    async fn create_comment(&self, thread_id: &str, content: &str)
        -> Result<Comment, GatewayError>;

    // Thread votes
    async fn upvote_thread(&self, thread_id: &str) -> Result<Vote, GatewayError>;
    async fn downvote_thread(&self, thread_id: &str) -> Result<Vote, GatewayError>;
    async fn neutral_vote_thread(&self, thread_id: &str) -> Result<Vote, GatewayError>;

    // Comment votes
    async fn upvote_comment(&self, thread_id: &str, comment_id: &str)
        -> Result<Vote, GatewayError>;
    async fn downvote_comment(&self, thread_id: &str, comment_id: &str)
        -> Result<Vote, GatewayError>;
    async fn neutral_vote_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
    ) -> Result<Vote, GatewayError>;

    // Leaderboard
    async fn get_leaderboards(&self) -> Result<Vec<LeaderboardEntry>, GatewayError>;
}

/// Persists the access credential across restarts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Result<Option<SecretString>, SessionError>;
    async fn set(&self, token: SecretString) -> Result<(), SessionError>;
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Blocking user notices (failed votes, failed posts, missing login).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
