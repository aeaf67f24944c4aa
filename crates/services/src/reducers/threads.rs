//! Thread list, thread detail and nested comments.

use domains::{Votable, VoteState};
use tracing::warn;

use crate::actions::{Action, CommentVote, ThreadVote};
use crate::categories::derive_categories;
use crate::state::ThreadsState;

pub fn reduce(mut state: ThreadsState, action: &Action) -> ThreadsState {
    match action {
        Action::ReceiveThreads(threads) => {
            state.categories = derive_categories(threads);
            state.threads = threads.clone();
        }
        Action::AddThread(thread) => {
            state.threads.insert(0, thread.clone());
            state.categories = derive_categories(&state.threads);
        }
        Action::ReceiveThreadDetail(detail) => state.thread_detail = detail.clone(),
        Action::AddComment(comment) => match state.thread_detail.as_mut() {
            Some(detail) => detail.comments.insert(0, comment.clone()),
            None => warn!(comment_id = %comment.id, "ADD_COMMENT without a loaded thread detail"),
        },

        Action::ToggleUpvoteThread(vote) => {
            update_thread(&mut state, vote, |t| t.toggle_upvote(&vote.user_id))
        }
        Action::ToggleDownvoteThread(vote) => {
            update_thread(&mut state, vote, |t| t.toggle_downvote(&vote.user_id))
        }
        Action::NeutralVoteThread(vote) => {
            update_thread(&mut state, vote, |t| t.neutralize(&vote.user_id))
        }
        Action::RestoreThreadVote { vote, list, detail } => {
            restore_thread(&mut state, vote, *list, *detail)
        }

        Action::ToggleUpvoteComment(vote) => {
            update_comment(&mut state, vote, |c| c.toggle_upvote(&vote.user_id))
        }
        Action::ToggleDownvoteComment(vote) => {
            update_comment(&mut state, vote, |c| c.toggle_downvote(&vote.user_id))
        }
        Action::NeutralVoteComment(vote) => {
            update_comment(&mut state, vote, |c| c.neutralize(&vote.user_id))
        }
        Action::RestoreCommentVote { vote, state: prior } => {
            update_comment(&mut state, vote, |c| c.set_vote(&vote.user_id, *prior))
        }

        Action::SetFilterCategory(category) => state.filtered_category = category.clone(),
        Action::SetIsLoading(is_loading) => state.is_loading = *is_loading,
        Action::SetError(error) => state.error = error.clone(),
        _ => {}
    }
    state
}

/// Applies `apply` to the thread in the list and to the open detail when it
/// is the same thread.
fn update_thread<F>(state: &mut ThreadsState, vote: &ThreadVote, mut apply: F)
where
    F: FnMut(&mut dyn Votable),
{
    for thread in state.threads.iter_mut().filter(|t| t.id == vote.thread_id) {
        apply(thread);
    }
    if let Some(detail) = state
        .thread_detail
        .as_mut()
        .filter(|d| d.id == vote.thread_id)
    {
        apply(detail);
    }
}

fn restore_thread(
    state: &mut ThreadsState,
    vote: &ThreadVote,
    list: Option<VoteState>,
    detail: Option<VoteState>,
) {
    if let Some(prior) = list {
        for thread in state.threads.iter_mut().filter(|t| t.id == vote.thread_id) {
            thread.set_vote(&vote.user_id, prior);
        }
    }
    if let Some(prior) = detail {
        if let Some(open) = state
            .thread_detail
            .as_mut()
            .filter(|d| d.id == vote.thread_id)
        {
            open.set_vote(&vote.user_id, prior);
        }
    }
}

fn update_comment<F>(state: &mut ThreadsState, vote: &CommentVote, mut apply: F)
where
    F: FnMut(&mut dyn Votable),
{
    let Some(detail) = state.thread_detail.as_mut() else {
        warn!(comment_id = %vote.comment_id, "comment vote without a loaded thread detail");
        return;
    };
    match detail.comments.iter_mut().find(|c| c.id == vote.comment_id) {
        Some(comment) => apply(comment),
        None => warn!(comment_id = %vote.comment_id, "comment vote for an unknown comment"),
    }
}

/// The user's current tag on a thread; the open detail wins over the list.
pub fn thread_vote_of(state: &ThreadsState, thread_id: &str, user_id: &str) -> Option<VoteState> {
    detail_thread_vote_of(state, thread_id, user_id)
        .or_else(|| listed_thread_vote_of(state, thread_id, user_id))
}

/// The user's tag on the list entry, if the thread is listed.
pub fn listed_thread_vote_of(
    state: &ThreadsState,
    thread_id: &str,
    user_id: &str,
) -> Option<VoteState> {
    state
        .threads
        .iter()
        .find(|t| t.id == thread_id)
        .map(|t| t.vote_of(user_id))
}

/// The user's tag on the open detail, if it is this thread.
pub fn detail_thread_vote_of(
    state: &ThreadsState,
    thread_id: &str,
    user_id: &str,
) -> Option<VoteState> {
    state
        .thread_detail
        .as_ref()
        .filter(|d| d.id == thread_id)
        .map(|d| d.vote_of(user_id))
}

pub fn comment_vote_of(state: &ThreadsState, comment_id: &str, user_id: &str) -> Option<VoteState> {
    state
        .thread_detail
        .as_ref()?
        .comments
        .iter()
        .find(|c| c.id == comment_id)
        .map(|c| c.vote_of(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domains::{Comment, Thread, ThreadDetail, User};

    fn owner() -> User {
        User {
            id: "u9".into(),
            name: "Owner".into(),
            email: String::new(),
            avatar: String::new(),
        }
    }

    fn thread(id: &str, category: &str) -> Thread {
        Thread {
            id: id.into(),
            title: format!("Thread {id}"),
            body: "body".into(),
            category: category.into(),
            created_at: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            owner_id: "u9".into(),
            owner: None,
            up_votes_by: vec![],
            down_votes_by: vec![],
            total_comments: 0,
        }
    }

    fn comment(id: &str) -> Comment {
        Comment {
            id: id.into(),
            content: format!("comment {id}"),
            created_at: Utc.with_ymd_and_hms(2022, 1, 2, 0, 0, 0).unwrap(),
            owner: owner(),
            up_votes_by: vec![],
            down_votes_by: vec![],
        }
    }

    fn detail(id: &str, comments: Vec<Comment>) -> ThreadDetail {
        ThreadDetail {
            id: id.into(),
            title: format!("Thread {id}"),
            body: "body".into(),
            category: "general".into(),
            created_at: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            owner: owner(),
            up_votes_by: vec![],
            down_votes_by: vec![],
            comments,
        }
    }

    fn tv(thread_id: &str, user_id: &str) -> ThreadVote {
        ThreadVote {
            thread_id: thread_id.into(),
            user_id: user_id.into(),
        }
    }

    fn cv(comment_id: &str, user_id: &str) -> CommentVote {
        CommentVote {
            thread_id: "t1".into(),
            comment_id: comment_id.into(),
            user_id: user_id.into(),
        }
    }

    fn loaded() -> ThreadsState {
        let state = reduce(
            ThreadsState::default(),
            &Action::ReceiveThreads(vec![thread("t1", "general"), thread("t2", "help")]),
        );
        reduce(
            state,
            &Action::ReceiveThreadDetail(Some(detail("t1", vec![comment("c1"), comment("c2")]))),
        )
    }

    #[test]
    fn receive_threads_replaces_list_and_derives_categories() {
        let state = reduce(
            ThreadsState::default(),
            &Action::ReceiveThreads(vec![
                thread("t1", "general"),
                thread("t2", "help"),
                thread("t3", ""),
                thread("t4", "general"),
            ]),
        );
        assert_eq!(state.threads.len(), 4);
        assert_eq!(state.categories, vec!["general", "help"]);

        let state = reduce(state, &Action::ReceiveThreads(vec![thread("t5", "news")]));
        assert_eq!(state.threads.len(), 1);
        assert_eq!(state.categories, vec!["news"]);
    }

    #[test]
    fn add_thread_prepends_and_puts_its_category_first() {
        let state = reduce(
            ThreadsState::default(),
            &Action::ReceiveThreads(vec![thread("t1", "general")]),
        );
        assert_eq!(state.categories, vec!["general"]);

        let state = reduce(state, &Action::AddThread(thread("t2", "help")));
        assert_eq!(state.threads[0].id, "t2");
        assert_eq!(state.categories, vec!["help", "general"]);
    }

    #[test]
    fn add_comment_prepends_to_detail() {
        let state = reduce(loaded(), &Action::AddComment(comment("c3")));
        let ids: Vec<_> = state
            .thread_detail
            .unwrap()
            .comments
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["c3", "c1", "c2"]);
    }

    #[test]
    fn add_comment_without_detail_is_ignored() {
        let state = reduce(
            ThreadsState::default(),
            &Action::ReceiveThreads(vec![thread("t1", "general")]),
        );
        assert_eq!(reduce(state.clone(), &Action::AddComment(comment("c1"))), state);
    }

    #[test]
    fn toggle_upvote_thread_updates_list_and_detail() {
        let state = reduce(loaded(), &Action::ToggleUpvoteThread(tv("t1", "u1")));
        assert_eq!(state.threads[0].up_votes_by, vec!["u1"]);
        assert_eq!(state.thread_detail.as_ref().unwrap().up_votes_by, vec!["u1"]);
        // Other threads are untouched.
        assert!(state.threads[1].up_votes_by.is_empty());
    }

    #[test]
    fn toggle_upvote_thread_twice_is_self_inverse() {
        let original = loaded();
        let action = Action::ToggleUpvoteThread(tv("t1", "u1"));
        let state = reduce(reduce(original.clone(), &action), &action);
        assert_eq!(state, original);
    }

    #[test]
    fn toggle_upvote_clears_an_existing_downvote() {
        let state = reduce(loaded(), &Action::ToggleDownvoteThread(tv("t1", "u1")));
        assert_eq!(state.threads[0].down_votes_by, vec!["u1"]);

        let state = reduce(state, &Action::ToggleUpvoteThread(tv("t1", "u1")));
        assert_eq!(state.threads[0].up_votes_by, vec!["u1"]);
        assert!(state.threads[0].down_votes_by.is_empty());
        let detail = state.thread_detail.unwrap();
        assert!(detail.down_votes_by.is_empty());
    }

    #[test]
    fn detail_of_another_thread_is_untouched() {
        let state = reduce(loaded(), &Action::ToggleUpvoteThread(tv("t2", "u1")));
        assert_eq!(state.threads[1].up_votes_by, vec!["u1"]);
        assert!(state.thread_detail.unwrap().up_votes_by.is_empty());
    }

    #[test]
    fn neutral_vote_thread_is_idempotent() {
        let state = reduce(loaded(), &Action::ToggleUpvoteThread(tv("t1", "u1")));
        let once = reduce(state, &Action::NeutralVoteThread(tv("t1", "u1")));
        let twice = reduce(once.clone(), &Action::NeutralVoteThread(tv("t1", "u1")));
        assert_eq!(once, twice);
        assert!(once.threads[0].up_votes_by.is_empty());
        assert!(once.threads[0].down_votes_by.is_empty());
    }

    #[test]
    fn restore_thread_vote_sets_prior_tag() {
        let state = reduce(loaded(), &Action::ToggleDownvoteThread(tv("t1", "u1")));
        let state = reduce(state, &Action::NeutralVoteThread(tv("t1", "u1")));
        let state = reduce(
            state,
            &Action::RestoreThreadVote {
                vote: tv("t1", "u1"),
                list: Some(VoteState::Down),
                detail: Some(VoteState::Down),
            },
        );
        assert_eq!(thread_vote_of(&state, "t1", "u1"), Some(VoteState::Down));
        assert_eq!(state.threads[0].down_votes_by, vec!["u1"]);
    }

    #[test]
    fn restore_thread_vote_treats_copies_separately() {
        let mut before = loaded();
        before.threads[0].down_votes_by.push("u1".into());
        let state = reduce(before.clone(), &Action::ToggleUpvoteThread(tv("t1", "u1")));
        assert_eq!(listed_thread_vote_of(&state, "t1", "u1"), Some(VoteState::Up));
        assert_eq!(detail_thread_vote_of(&state, "t1", "u1"), Some(VoteState::Up));

        let state = reduce(
            state,
            &Action::RestoreThreadVote {
                vote: tv("t1", "u1"),
                list: Some(VoteState::Down),
                detail: Some(VoteState::Neutral),
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn restore_thread_vote_skips_absent_copies() {
        let state = reduce(loaded(), &Action::ToggleUpvoteThread(tv("t1", "u1")));
        let state = reduce(
            state,
            &Action::RestoreThreadVote {
                vote: tv("t1", "u1"),
                list: None,
                detail: Some(VoteState::Neutral),
            },
        );
        assert_eq!(listed_thread_vote_of(&state, "t1", "u1"), Some(VoteState::Up));
        assert_eq!(detail_thread_vote_of(&state, "t1", "u1"), Some(VoteState::Neutral));
    }

    #[test]
    fn comment_toggles_target_one_comment() {
        let state = reduce(loaded(), &Action::ToggleUpvoteComment(cv("c2", "u1")));
        let detail = state.thread_detail.as_ref().unwrap();
        assert!(detail.comments[0].up_votes_by.is_empty());
        assert_eq!(detail.comments[1].up_votes_by, vec!["u1"]);

        let state = reduce(state, &Action::ToggleDownvoteComment(cv("c2", "u1")));
        assert_eq!(comment_vote_of(&state, "c2", "u1"), Some(VoteState::Down));

        let state = reduce(state, &Action::NeutralVoteComment(cv("c2", "u1")));
        assert_eq!(comment_vote_of(&state, "c2", "u1"), Some(VoteState::Neutral));

        let state = reduce(
            state,
            &Action::RestoreCommentVote {
                vote: cv("c2", "u1"),
                state: VoteState::Up,
            },
        );
        assert_eq!(comment_vote_of(&state, "c2", "u1"), Some(VoteState::Up));
    }

    #[test]
    fn comment_vote_without_detail_or_comment_is_ignored() {
        let bare = ThreadsState::default();
        assert_eq!(reduce(bare.clone(), &Action::ToggleUpvoteComment(cv("c1", "u1"))), bare);

        let state = loaded();
        assert_eq!(
            reduce(state.clone(), &Action::ToggleUpvoteComment(cv("missing", "u1"))),
            state
        );
    }

    #[test]
    fn vote_sequences_never_break_exclusivity() {
        let mut state = loaded();
        let users = ["u1", "u2"];
        for step in 0..40 {
            let user = users[step % 2];
            let action = match step % 6 {
                0 => Action::ToggleUpvoteThread(tv("t1", user)),
                1 => Action::ToggleDownvoteThread(tv("t1", user)),
                2 => Action::NeutralVoteThread(tv("t1", user)),
                3 => Action::ToggleUpvoteComment(cv("c1", user)),
                4 => Action::ToggleDownvoteComment(cv("c1", user)),
                _ => Action::NeutralVoteComment(cv("c1", user)),
            };
            state = reduce(state, &action);

            let detail = state.thread_detail.as_ref().unwrap();
            let votables: [&dyn Votable; 3] = [&state.threads[0], detail, &detail.comments[0]];
            for v in votables {
                for id in v.up_votes_by() {
                    assert!(!v.down_votes_by().contains(id));
                }
            }
        }
    }

    #[test]
    fn simple_field_replacements() {
        let state = reduce(ThreadsState::default(), &Action::SetFilterCategory("help".into()));
        assert_eq!(state.filtered_category, "help");
        let state = reduce(state, &Action::SetIsLoading(true));
        assert!(state.is_loading);
        let state = reduce(state, &Action::SetError(Some("Failed to get threads".into())));
        assert_eq!(state.error.as_deref(), Some("Failed to get threads"));
    }

    #[test]
    fn foreign_actions_are_identity() {
        let state = loaded();
        assert_eq!(reduce(state.clone(), &Action::UnsetAuthUser), state);
        assert_eq!(reduce(state.clone(), &Action::SetUsersLoading(true)), state);
        assert_eq!(reduce(state.clone(), &Action::HideLoading), state);
    }
}
