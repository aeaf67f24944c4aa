//! Shared builders for command handler tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use domains::{
    Comment, MockForumGateway, MockNotifier, MockSessionStore, Thread, ThreadDetail, User, Vote,
};
use tokio::sync::broadcast;

use super::ForumService;
use crate::actions::Action;
use crate::state::RootState;
use crate::store::Store;

pub const USER_ID: &str = "user-123";

pub fn user(id: &str) -> User {
    User {
        id: id.into(),
        name: format!("User {id}"),
        email: format!("{id}@example.com"),
        avatar: format!("https://example.com/{id}.jpg"),
    }
}

pub fn thread(id: &str, category: &str, owner_id: &str) -> Thread {
    Thread {
        id: id.into(),
        title: format!("Thread {id}"),
        body: format!("This is thread {id}"),
        category: category.into(),
        created_at: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
        owner_id: owner_id.into(),
        owner: None,
        up_votes_by: vec![],
        down_votes_by: vec![],
        total_comments: 0,
    }
}

pub fn comment(id: &str) -> Comment {
    Comment {
        id: id.into(),
        content: format!("Comment {id}"),
        created_at: Utc.with_ymd_and_hms(2022, 1, 2, 0, 0, 0).unwrap(),
        owner: user("user-2"),
        up_votes_by: vec![],
        down_votes_by: vec![],
    }
}

pub fn detail(id: &str) -> ThreadDetail {
    ThreadDetail {
        id: id.into(),
        title: format!("Thread {id}"),
        body: format!("This is thread {id}"),
        category: "general".into(),
        created_at: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
        owner: user("user-1"),
        up_votes_by: vec![],
        down_votes_by: vec![],
        comments: vec![comment("c1"), comment("c2")],
    }
}

pub fn vote_record(vote_type: i8) -> Vote {
    Vote {
        id: "vote-1".into(),
        user_id: USER_ID.into(),
        thread_id: Some("t1".into()),
        comment_id: None,
        vote_type,
    }
}

/// Threads `t1` (general) and `t2` (help) loaded, `t1` open, nobody logged in.
pub fn anonymous_state() -> RootState {
    RootState::default()
        .reduce(&Action::ReceiveThreads(vec![
            thread("t1", "general", "user-1"),
            thread("t2", "help", "user-2"),
        ]))
        .reduce(&Action::ReceiveThreadDetail(Some(detail("t1"))))
}

pub fn logged_in_state() -> RootState {
    anonymous_state().reduce(&Action::SetAuthUser(Some(user(USER_ID))))
}

pub fn service_with(
    gateway: MockForumGateway,
    notifier: MockNotifier,
    state: RootState,
) -> (ForumService, Arc<Store>) {
    service_with_session(gateway, MockSessionStore::new(), notifier, state)
}

pub fn service_with_session(
    gateway: MockForumGateway,
    session: MockSessionStore,
    notifier: MockNotifier,
    state: RootState,
) -> (ForumService, Arc<Store>) {
    let store = Arc::new(Store::with_state(state));
    let service = ForumService::new(
        store.clone(),
        Arc::new(gateway),
        Arc::new(session),
        Arc::new(notifier),
    );
    (service, store)
}

pub fn drain(actions: &mut broadcast::Receiver<Action>) -> Vec<Action> {
    let mut out = Vec::new();
    while let Ok(action) = actions.try_recv() {
        out.push(action);
    }
    out
}
