//! # Reducers
//!
//! Pure `(state, action) -> state` functions, one per slice. Each returns
//! its slice untouched for actions that belong to another slice.

pub mod auth;
pub mod leaderboard;
pub mod loading_bar;
pub mod threads;
pub mod users;
