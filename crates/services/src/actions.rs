//! # Actions
//!
//! Every state transition the store knows about. Serialized as
//! `{"type": "TOGGLE_UPVOTE_THREAD", "payload": {...}}` for logs and
//! debugging tools.

use domains::{Comment, LeaderboardEntry, Thread, ThreadDetail, User, VoteState};
use serde::Serialize;

/// Identifies one user's vote on a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadVote {
    pub thread_id: String,
    pub user_id: String,
}

/// Identifies one user's vote on a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentVote {
    pub thread_id: String,
    pub comment_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // Auth
    SetAuthUser(Option<User>),
    UnsetAuthUser,
    SetAuthError(String),
    ClearAuthError,

    // Threads
    ReceiveThreads(Vec<Thread>),
    AddThread(Thread),
    ReceiveThreadDetail(Option<ThreadDetail>),
    AddComment(Comment),
    ToggleUpvoteThread(ThreadVote),
    ToggleDownvoteThread(ThreadVote),
    NeutralVoteThread(ThreadVote),
    /// Puts back each copy's own prior tag; `None` leaves that copy alone.
    RestoreThreadVote {
        vote: ThreadVote,
        list: Option<VoteState>,
        detail: Option<VoteState>,
    },
    ToggleUpvoteComment(CommentVote),
    ToggleDownvoteComment(CommentVote),
    NeutralVoteComment(CommentVote),
    RestoreCommentVote { vote: CommentVote, state: VoteState },
    SetFilterCategory(String),
    SetIsLoading(bool),
    SetError(Option<String>),

    // Users
    ReceiveUsers(Vec<User>),
    SetUsersLoading(bool),
    SetUsersError(Option<String>),

    // Leaderboard
    ReceiveLeaderboards(Vec<LeaderboardEntry>),
    SetLeaderboardLoading(bool),
    SetLeaderboardError(Option<String>),

    // Global loading bar
    ShowLoading,
    HideLoading,
}

impl Action {
    /// The wire name of the action, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetAuthUser(_) => "SET_AUTH_USER",
            Action::UnsetAuthUser => "UNSET_AUTH_USER",
            Action::SetAuthError(_) => "SET_AUTH_ERROR",
            Action::ClearAuthError => "CLEAR_AUTH_ERROR",
            Action::ReceiveThreads(_) => "RECEIVE_THREADS",
            Action::AddThread(_) => "ADD_THREAD",
            Action::ReceiveThreadDetail(_) => "RECEIVE_THREAD_DETAIL",
            Action::AddComment(_) => "ADD_COMMENT",
            Action::ToggleUpvoteThread(_) => "TOGGLE_UPVOTE_THREAD",
            Action::ToggleDownvoteThread(_) => "TOGGLE_DOWNVOTE_THREAD",
            Action::NeutralVoteThread(_) => "NEUTRAL_VOTE_THREAD",
            Action::RestoreThreadVote { .. } => "RESTORE_THREAD_VOTE",
            Action::ToggleUpvoteComment(_) => "TOGGLE_UPVOTE_COMMENT",
            Action::ToggleDownvoteComment(_) => "TOGGLE_DOWNVOTE_COMMENT",
            Action::NeutralVoteComment(_) => "NEUTRAL_VOTE_COMMENT",
            Action::RestoreCommentVote { .. } => "RESTORE_COMMENT_VOTE",
            Action::SetFilterCategory(_) => "SET_FILTER_CATEGORY",
            Action::SetIsLoading(_) => "SET_IS_LOADING",
            Action::SetError(_) => "SET_ERROR",
            Action::ReceiveUsers(_) => "RECEIVE_USERS",
            Action::SetUsersLoading(_) => "SET_USERS_LOADING",
            Action::SetUsersError(_) => "SET_USERS_ERROR",
            Action::ReceiveLeaderboards(_) => "RECEIVE_LEADERBOARDS",
            Action::SetLeaderboardLoading(_) => "SET_LEADERBOARD_LOADING",
            Action::SetLeaderboardError(_) => "SET_LEADERBOARD_ERROR",
            Action::ShowLoading => "SHOW_LOADING",
            Action::HideLoading => "HIDE_LOADING",
        }
    }
}
