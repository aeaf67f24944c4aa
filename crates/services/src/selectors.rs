//! Read-only views over the state tree for presentation layers.

use domains::{LeaderboardEntry, Thread};

use crate::state::{RootState, ThreadsState};

/// Threads matching the active category filter; all threads when unset.
pub fn visible_threads(state: &ThreadsState) -> Vec<&Thread> {
    if state.filtered_category.is_empty() {
        return state.threads.iter().collect();
    }
    state
        .threads
        .iter()
        .filter(|t| t.category == state.filtered_category)
        .collect()
}

pub fn auth_user_id(state: &RootState) -> Option<&str> {
    state.auth.auth_user.as_ref().map(|u| u.id.as_str())
}

pub fn is_loading_bar_visible(state: &RootState) -> bool {
    state.loading_bar > 0
}

/// Leaderboard entries paired with their 1-based rank (server order).
pub fn ranked_leaderboard(state: &RootState) -> impl Iterator<Item = (usize, &LeaderboardEntry)> {
    state
        .leaderboard
        .leaderboards
        .iter()
        .enumerate()
        .map(|(idx, entry)| (idx + 1, entry))
}
