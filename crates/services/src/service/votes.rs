//! # Optimistic Voting
//!
//! A vote is applied to the store before the Gateway hears about it. If the
//! Gateway refuses, the user is told and a compensating action puts the
//! previous tag back.
//!
//! Planning is pure ([`VotePlan::prepare`]) so the forward/rollback pair can
//! be checked without a store or a network.

use domains::{GatewayError, Vote, VoteState};
use tracing::{debug, warn};

use super::ForumService;
use crate::actions::{Action, CommentVote, ThreadVote};
use crate::error::{Result, ServiceError};
use crate::reducers::threads::{comment_vote_of, detail_thread_vote_of, listed_thread_vote_of};
use crate::selectors::auth_user_id;
use crate::state::RootState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteTarget {
    Thread {
        thread_id: String,
    },
    Comment {
        thread_id: String,
        comment_id: String,
    },
}

impl VoteTarget {
    pub fn thread(thread_id: impl Into<String>) -> Self {
        Self::Thread {
            thread_id: thread_id.into(),
        }
    }

    pub fn comment(thread_id: impl Into<String>, comment_id: impl Into<String>) -> Self {
        Self::Comment {
            thread_id: thread_id.into(),
            comment_id: comment_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteIntent {
    ToggleUp,
    ToggleDown,
    Neutral,
}

impl VoteIntent {
    /// True when dispatching the forward action a second time lands back on
    /// `prior`.
    fn replay_restores(self, prior: VoteState) -> bool {
        matches!(
            (self, prior),
            (VoteIntent::ToggleUp, VoteState::Neutral | VoteState::Up)
                | (VoteIntent::ToggleDown, VoteState::Neutral | VoteState::Down)
                | (VoteIntent::Neutral, VoteState::Neutral)
        )
    }
}

/// The optimistic mutation and its compensation for one vote.
#[derive(Debug, Clone, PartialEq)]
pub struct VotePlan {
    pub target: VoteTarget,
    pub intent: VoteIntent,
    pub user_id: String,
    /// The user's tag before the forward action as shown: the open detail
    /// first, then the list entry, neutral when neither is loaded.
    pub prior: VoteState,
    pub forward: Action,
    pub rollback: Action,
}

impl VotePlan {
    pub fn prepare(state: &RootState, target: VoteTarget, intent: VoteIntent) -> Result<Self> {
        let user_id = auth_user_id(state)
            .ok_or(ServiceError::Unauthenticated)?
            .to_string();

        // The list entry and the open detail may disagree, so each copy keeps
        // its own prior. A target that is not loaded counts as neutral and
        // its forward action changes nothing.
        let forward = forward_action(&target, intent, &user_id);
        let (prior, rollback) = match &target {
            VoteTarget::Thread { thread_id } => {
                let list = listed_thread_vote_of(&state.threads, thread_id, &user_id);
                let detail = detail_thread_vote_of(&state.threads, thread_id, &user_id);
                let replayable = [list, detail]
                    .into_iter()
                    .flatten()
                    .all(|prior| intent.replay_restores(prior));
                let rollback = if replayable {
                    forward.clone()
                } else {
                    Action::RestoreThreadVote {
                        vote: ThreadVote {
                            thread_id: thread_id.clone(),
                            user_id: user_id.clone(),
                        },
                        list,
                        detail,
                    }
                };
                (detail.or(list).unwrap_or_default(), rollback)
            }
            VoteTarget::Comment {
                thread_id,
                comment_id,
            } => {
                let prior = comment_vote_of(&state.threads, comment_id, &user_id)
                    .unwrap_or_default();
                let rollback = if intent.replay_restores(prior) {
                    forward.clone()
                } else {
                    Action::RestoreCommentVote {
                        vote: CommentVote {
                            thread_id: thread_id.clone(),
                            comment_id: comment_id.clone(),
                            user_id: user_id.clone(),
                        },
                        state: prior,
                    }
                };
                (prior, rollback)
            }
        };

        Ok(Self {
            target,
            intent,
            user_id,
            prior,
            forward,
            rollback,
        })
    }
}

fn forward_action(target: &VoteTarget, intent: VoteIntent, user_id: &str) -> Action {
    match target {
        VoteTarget::Thread { thread_id } => {
            let vote = ThreadVote {
                thread_id: thread_id.clone(),
                user_id: user_id.to_string(),
            };
            match intent {
                VoteIntent::ToggleUp => Action::ToggleUpvoteThread(vote),
                VoteIntent::ToggleDown => Action::ToggleDownvoteThread(vote),
                VoteIntent::Neutral => Action::NeutralVoteThread(vote),
            }
        }
        VoteTarget::Comment {
            thread_id,
            comment_id,
        } => {
            let vote = CommentVote {
                thread_id: thread_id.clone(),
                comment_id: comment_id.clone(),
                user_id: user_id.to_string(),
            };
            match intent {
                VoteIntent::ToggleUp => Action::ToggleUpvoteComment(vote),
                VoteIntent::ToggleDown => Action::ToggleDownvoteComment(vote),
                VoteIntent::Neutral => Action::NeutralVoteComment(vote),
            }
        }
    }
}

impl ForumService {
    pub async fn toggle_upvote_thread(&self, thread_id: &str) -> Result<()> {
        self.cast_vote(VoteTarget::thread(thread_id), VoteIntent::ToggleUp)
            .await
    }

    pub async fn toggle_downvote_thread(&self, thread_id: &str) -> Result<()> {
        self.cast_vote(VoteTarget::thread(thread_id), VoteIntent::ToggleDown)
            .await
    }

    pub async fn neutral_vote_thread(&self, thread_id: &str) -> Result<()> {
        self.cast_vote(VoteTarget::thread(thread_id), VoteIntent::Neutral)
            .await
    }

    pub async fn toggle_upvote_comment(&self, thread_id: &str, comment_id: &str) -> Result<()> {
        self.cast_vote(
            VoteTarget::comment(thread_id, comment_id),
            VoteIntent::ToggleUp,
        )
        .await
    }

    pub async fn toggle_downvote_comment(&self, thread_id: &str, comment_id: &str) -> Result<()> {
        self.cast_vote(
            VoteTarget::comment(thread_id, comment_id),
            VoteIntent::ToggleDown,
        )
        .await
    }

    pub async fn neutral_vote_comment(&self, thread_id: &str, comment_id: &str) -> Result<()> {
        self.cast_vote(
            VoteTarget::comment(thread_id, comment_id),
            VoteIntent::Neutral,
        )
        .await
    }

    /// Runs the optimistic voting protocol for one vote.
    pub async fn cast_vote(&self, target: VoteTarget, intent: VoteIntent) -> Result<()> {
        // 1. Plan + optimistic mutation, atomically and before any I/O
        let planned = self.store.dispatch_with(|state| -> Result<(Action, VotePlan)> {
            let plan = VotePlan::prepare(state, target, intent)?;
            Ok((plan.forward.clone(), plan))
        });
        let plan = match planned {
            Ok(plan) => plan,
            Err(err) => {
                warn!(error = %err, "vote rejected locally");
                self.notifier.notify(&err.to_string());
                return Err(err);
            }
        };

        // 2. Tell the Gateway; success needs no reconciliation
        match self.send_vote(&plan).await {
            Ok(vote) => {
                debug!(vote_id = %vote.id, action = plan.forward.name(), "vote accepted");
                Ok(())
            }
            Err(err) => {
                // 3. Notify, then undo the optimistic mutation
                warn!(error = %err, action = plan.forward.name(), "vote failed, rolling back");
                self.notifier.notify(&err.to_string());
                self.store.dispatch(plan.rollback);
                Err(err.into())
            }
        }
    }

    async fn send_vote(&self, plan: &VotePlan) -> std::result::Result<Vote, GatewayError> {
        let gateway = &self.gateway;
        match (&plan.target, plan.intent) {
            (VoteTarget::Thread { thread_id }, VoteIntent::ToggleUp) => {
                gateway.upvote_thread(thread_id).await
            }
            (VoteTarget::Thread { thread_id }, VoteIntent::ToggleDown) => {
                gateway.downvote_thread(thread_id).await
            }
            (VoteTarget::Thread { thread_id }, VoteIntent::Neutral) => {
                gateway.neutral_vote_thread(thread_id).await
            }
            (VoteTarget::Comment { thread_id, comment_id }, VoteIntent::ToggleUp) => {
                gateway.upvote_comment(thread_id, comment_id).await
            }
            (VoteTarget::Comment { thread_id, comment_id }, VoteIntent::ToggleDown) => {
                gateway.downvote_comment(thread_id, comment_id).await
            }
            (VoteTarget::Comment { thread_id, comment_id }, VoteIntent::Neutral) => {
                gateway.neutral_vote_comment(thread_id, comment_id).await
            }
        }
    }
}
