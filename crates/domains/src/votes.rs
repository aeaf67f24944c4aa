//! # Votes
//!
//! A user's relationship to a thread or comment is exactly one of
//! [`VoteState::Neutral`], [`VoteState::Up`] or [`VoteState::Down`].
//! Entities store it as two id lists; every mutation here keeps a user id
//! in at most one of them.

use serde::{Deserialize, Serialize};

use crate::models::{Comment, Thread, ThreadDetail};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    #[default]
    Neutral,
    Up,
    Down,
}

/// Ballot operations shared by every votable entity.
pub trait Votable {
    fn up_votes_by(&self) -> &[String];
    fn down_votes_by(&self) -> &[String];
    /// Mutable access to `(up_votes_by, down_votes_by)`.
    fn ballots_mut(&mut self) -> (&mut Vec<String>, &mut Vec<String>);

    fn vote_of(&self, user_id: &str) -> VoteState {
        if self.up_votes_by().iter().any(|id| id == user_id) {
            VoteState::Up
        } else if self.down_votes_by().iter().any(|id| id == user_id) {
            VoteState::Down
        } else {
            VoteState::Neutral
        }
    }

    /// Un-votes when already upvoted, otherwise upvotes and drops any downvote.
    fn toggle_upvote(&mut self, user_id: &str) {
        let (up, down) = self.ballots_mut();
        toggle(up, user_id);
        remove(down, user_id);
    }

    fn toggle_downvote(&mut self, user_id: &str) {
        let (up, down) = self.ballots_mut();
        toggle(down, user_id);
        remove(up, user_id);
    }

    fn neutralize(&mut self, user_id: &str) {
        let (up, down) = self.ballots_mut();
        remove(up, user_id);
        remove(down, user_id);
    }

    fn set_vote(&mut self, user_id: &str, state: VoteState) {
        if self.vote_of(user_id) == state {
            return;
        }
        self.neutralize(user_id);
        let (up, down) = self.ballots_mut();
        match state {
            VoteState::Up => up.push(user_id.to_string()),
            VoteState::Down => down.push(user_id.to_string()),
            VoteState::Neutral => {}
        }
    }

    /// Upvotes minus downvotes.
    fn score(&self) -> i64 {
        self.up_votes_by().len() as i64 - self.down_votes_by().len() as i64
    }
}

fn toggle(ballots: &mut Vec<String>, user_id: &str) {
    if ballots.iter().any(|id| id == user_id) {
        remove(ballots, user_id);
    } else {
        ballots.push(user_id.to_string());
    }
}

fn remove(ballots: &mut Vec<String>, user_id: &str) {
    ballots.retain(|id| id != user_id);
}

macro_rules! impl_votable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Votable for $ty {
                fn up_votes_by(&self) -> &[String] {
                    &self.up_votes_by
                }

                fn down_votes_by(&self) -> &[String] {
                    &self.down_votes_by
                }

                fn ballots_mut(&mut self) -> (&mut Vec<String>, &mut Vec<String>) {
                    (&mut self.up_votes_by, &mut self.down_votes_by)
                }
            }
        )+
    };
}

impl_votable!(Thread, ThreadDetail, Comment);
