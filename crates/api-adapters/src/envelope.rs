//! # Response Envelope
//!
//! Every Gateway response looks like
//! `{"status": "success" | "fail", "message": "...", "data": {...}}`.

use domains::{Comment, GatewayError, LeaderboardEntry, Thread, ThreadDetail, User, Vote};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps `data`, turning any non-success status into a rejection
    /// carrying the server message.
    pub fn into_data(self) -> Result<T, GatewayError> {
        if self.status != SUCCESS {
            return Err(GatewayError::Rejected(self.message));
        }
        self.data
            .ok_or_else(|| GatewayError::Decode("success response without data".into()))
    }
}

/// Decodes a raw body into the `data` payload.
///
/// A failed status wins over a malformed `data` field, so the server's
/// message reaches the user even when the payload shape is unexpected.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    let raw: Envelope<serde_json::Value> =
        serde_json::from_slice(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    let value = raw.into_data()?;
    serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
}

// `data` payloads, one per endpoint family.

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UsersData {
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ThreadsData {
    pub threads: Vec<Thread>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadData {
    pub thread: Thread,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailThreadData {
    pub detail_thread: ThreadDetail,
}

#[derive(Debug, Deserialize)]
pub struct CommentData {
    pub comment: Comment,
}

#[derive(Debug, Deserialize)]
pub struct VoteData {
    pub vote: Vote,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardsData {
    pub leaderboards: Vec<LeaderboardEntry>,
}
