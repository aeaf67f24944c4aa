//! # State Tree
//!
//! The single source of truth composed from one slice per domain.

use domains::{LeaderboardEntry, Thread, ThreadDetail, User};
use serde::Serialize;

use crate::actions::Action;
use crate::reducers;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub auth_user: Option<User>,
    /// Always `auth_user.is_some()`; kept as a field for consumers.
    pub is_authenticated: bool,
    pub is_auth_error: bool,
    pub auth_error_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsState {
    pub threads: Vec<Thread>,
    pub thread_detail: Option<ThreadDetail>,
    /// Derived from `threads` on every list change.
    pub categories: Vec<String>,
    /// Empty means no filter.
    pub filtered_category: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersState {
    pub users: Vec<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardState {
    pub leaderboards: Vec<LeaderboardEntry>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootState {
    pub auth: AuthState,
    pub threads: ThreadsState,
    pub users: UsersState,
    pub leaderboard: LeaderboardState,
    /// Number of gateway requests currently showing the loading bar.
    pub loading_bar: u32,
}

impl RootState {
    /// Feeds `action` to every slice reducer.
    pub fn reduce(self, action: &Action) -> Self {
        Self {
            auth: reducers::auth::reduce(self.auth, action),
            threads: reducers::threads::reduce(self.threads, action),
            users: reducers::users::reduce(self.users, action),
            leaderboard: reducers::leaderboard::reduce(self.leaderboard, action),
            loading_bar: reducers::loading_bar::reduce(self.loading_bar, action),
        }
    }
}
