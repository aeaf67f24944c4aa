//! # Domain Models
//!
//! These structs represent the entities served by the forum Gateway.
//! Field names follow Rust conventions; the wire format is camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered forum member.
///
/// Owners embedded in thread details and comments omit `email`, so it
/// defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

/// A thread as listed on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Free-form tag; empty when the author left it blank.
    #[serde(default)]
    pub category: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub owner_id: String,
    /// Resolved locally from the user list; never sent by the Gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    #[serde(default)]
    pub up_votes_by: Vec<String>,
    #[serde(default)]
    pub down_votes_by: Vec<String>,
    #[serde(default)]
    pub total_comments: u32,
}

/// A single thread with its comments, as shown on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDetail {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub owner: User,
    #[serde(default)]
    pub up_votes_by: Vec<String>,
    #[serde(default)]
    pub down_votes_by: Vec<String>,
    /// Server order on fetch; local additions are prepended.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub owner: User,
    #[serde(default)]
    pub up_votes_by: Vec<String>,
    #[serde(default)]
    pub down_votes_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user: User,
    pub score: i64,
}

/// Vote record echoed by the vote endpoints.
///
/// `vote_type` is 1 (up), -1 (down) or 0 (neutral).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    pub vote_type: i8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    pub category: String,
}
