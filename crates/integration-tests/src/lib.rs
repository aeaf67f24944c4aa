//! forum-client/crates/integration-tests/src/lib.rs
//!
//! An in-process fake of the forum Gateway served by `axum`, plus helpers
//! shared by the integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use domains::{
    Comment, LeaderboardEntry, Notifier, Thread, ThreadDetail, User, Votable, VoteState,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const PASSWORD: &str = "password123";

/// Everything the fake Gateway knows. Tests seed and inspect it directly.
#[derive(Debug, Default)]
pub struct ForumData {
    pub users: Vec<User>,
    pub threads: Vec<ThreadDetail>,
    pub leaderboards: Vec<LeaderboardEntry>,
    /// When set, every vote endpoint answers with a failure envelope.
    pub reject_votes: bool,
    /// `Authorization` header of every request, in arrival order.
    pub authorizations: Vec<Option<String>>,
    next_id: u32,
}

impl ForumData {
    /// Two users (`user-1`, `user-2`) and one thread by `user-1` with one
    /// comment by `user-2`.
    pub fn seeded() -> Self {
        let john = user("user-1", "John Doe");
        let jane = user("user-2", "Jane Doe");
        let thread = ThreadDetail {
            id: "thread-1".into(),
            title: "First thread".into(),
            body: "Hello forum".into(),
            category: "general".into(),
            created_at: Utc.with_ymd_and_hms(2023, 5, 1, 8, 0, 0).unwrap(),
            owner: john.clone(),
            up_votes_by: vec![],
            down_votes_by: vec![],
            comments: vec![Comment {
                id: "comment-1".into(),
                content: "First!".into(),
                created_at: Utc.with_ymd_and_hms(2023, 5, 1, 9, 0, 0).unwrap(),
                owner: jane.clone(),
                up_votes_by: vec![],
                down_votes_by: vec![],
            }],
        };
        Self {
            leaderboards: vec![
                LeaderboardEntry { user: john.clone(), score: 25 },
                LeaderboardEntry { user: jane.clone(), score: 10 },
            ],
            users: vec![john, jane],
            threads: vec![thread],
            ..Self::default()
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-new-{}", self.next_id)
    }

    pub fn thread(&self, thread_id: &str) -> Option<&ThreadDetail> {
        self.threads.iter().find(|t| t.id == thread_id)
    }
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: format!("{id}@example.com"),
        avatar: format!("https://example.com/{id}.png"),
    }
}

/// Token the fake issues for a user.
pub fn token_for(user_id: &str) -> String {
    format!("token-{user_id}")
}

/// Collects user notices instead of showing them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

type Shared = Arc<Mutex<ForumData>>;

fn lock(data: &Shared) -> MutexGuard<'_, ForumData> {
    data.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A running fake Gateway. Aborted on drop.
pub struct FakeGateway {
    pub base_url: String,
    data: Shared,
    handle: JoinHandle<()>,
}

impl FakeGateway {
    pub async fn start(data: ForumData) -> anyhow::Result<Self> {
        let data: Shared = Arc::new(Mutex::new(data));
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let app = router(data.clone());
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base_url: format!("http://{addr}"),
            data,
            handle,
        })
    }

    pub fn data(&self) -> MutexGuard<'_, ForumData> {
        lock(&self.data)
    }
}

impl Drop for FakeGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn router(data: Shared) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users/me", get(own_profile))
        .route("/users", get(all_users))
        .route("/threads", get(all_threads).post(create_thread))
        .route("/threads/{thread_id}", get(thread_detail))
        .route("/threads/{thread_id}/comments", post(create_comment))
        .route("/threads/{thread_id}/{kind}", post(vote_thread))
        .route(
            "/threads/{thread_id}/comments/{comment_id}/{kind}",
            post(vote_comment),
        )
        .route("/leaderboards", get(leaderboards))
        .with_state(data)
}

// Envelope helpers

fn success(status: StatusCode, data: Value) -> Response {
    (
        status,
        Json(json!({ "status": "success", "message": "ok", "data": data })),
    )
        .into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "status": "fail", "message": message }))).into_response()
}

/// Records the `Authorization` header and resolves it to a user id.
fn caller(data: &mut ForumData, headers: &HeaderMap) -> Option<String> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    data.authorizations.push(header.clone());
    let token = header?.strip_prefix("Bearer ")?.to_string();
    data.users
        .iter()
        .find(|u| token_for(&u.id) == token)
        .map(|u| u.id.clone())
}

fn str_field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}

// Handlers

async fn register(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut data = lock(&data);
    let email = str_field(&body, "email");
    if data.users.iter().any(|u| u.email == email) {
        return fail(StatusCode::BAD_REQUEST, "email is already taken");
    }
    let id = data.fresh_id("user");
    let created = User {
        id,
        name: str_field(&body, "name").into(),
        email: email.into(),
        avatar: String::new(),
    };
    data.users.push(created.clone());
    success(StatusCode::CREATED, json!({ "user": created }))
}

async fn login(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    let data = lock(&data);
    let email = str_field(&body, "email");
    let known = data.users.iter().find(|u| u.email == email);
    match known {
        Some(u) if str_field(&body, "password") == PASSWORD => {
            success(StatusCode::OK, json!({ "token": token_for(&u.id) }))
        }
        _ => fail(StatusCode::UNAUTHORIZED, "email or password is wrong"),
    }
}

async fn own_profile(State(data): State<Shared>, headers: HeaderMap) -> Response {
    let mut data = lock(&data);
    let Some(user_id) = caller(&mut data, &headers) else {
        return fail(StatusCode::UNAUTHORIZED, "Missing authentication");
    };
    let me = data.users.iter().find(|u| u.id == user_id).cloned();
    success(StatusCode::OK, json!({ "user": me }))
}

async fn all_users(State(data): State<Shared>) -> Response {
    let data = lock(&data);
    success(StatusCode::OK, json!({ "users": data.users }))
}

async fn all_threads(State(data): State<Shared>) -> Response {
    let data = lock(&data);
    let threads: Vec<Thread> = data.threads.iter().map(summary).collect();
    success(StatusCode::OK, json!({ "threads": threads }))
}

fn summary(detail: &ThreadDetail) -> Thread {
    Thread {
        id: detail.id.clone(),
        title: detail.title.clone(),
        body: detail.body.clone(),
        category: detail.category.clone(),
        created_at: detail.created_at,
        owner_id: detail.owner.id.clone(),
        owner: None,
        up_votes_by: detail.up_votes_by.clone(),
        down_votes_by: detail.down_votes_by.clone(),
        total_comments: detail.comments.len() as u32,
    }
}

async fn thread_detail(State(data): State<Shared>, Path(thread_id): Path<String>) -> Response {
    let data = lock(&data);
    match data.thread(&thread_id) {
        Some(detail) => success(StatusCode::OK, json!({ "detailThread": detail })),
        None => fail(StatusCode::NOT_FOUND, "thread not found"),
    }
}

async fn create_thread(
    State(data): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = lock(&data);
    let Some(owner) = caller(&mut data, &headers)
        .and_then(|id| data.users.iter().find(|u| u.id == id).cloned())
    else {
        return fail(StatusCode::UNAUTHORIZED, "Missing authentication");
    };
    let title = str_field(&body, "title");
    if title.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "title is required");
    }
    let id = data.fresh_id("thread");
    let category = match str_field(&body, "category") {
        "" => "general",
        other => other,
    };
    let detail = ThreadDetail {
        id,
        title: title.into(),
        body: str_field(&body, "body").into(),
        category: category.into(),
        created_at: Utc::now(),
        owner,
        up_votes_by: vec![],
        down_votes_by: vec![],
        comments: vec![],
    };
    let created = summary(&detail);
    data.threads.insert(0, detail);
    success(StatusCode::CREATED, json!({ "thread": created }))
}

async fn create_comment(
    State(data): State<Shared>,
    Path(thread_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = lock(&data);
    let Some(owner) = caller(&mut data, &headers)
        .and_then(|id| data.users.iter().find(|u| u.id == id).cloned())
    else {
        return fail(StatusCode::UNAUTHORIZED, "Missing authentication");
    };
    let id = data.fresh_id("comment");
    let content = str_field(&body, "content").to_string();
    let Some(thread) = data.threads.iter_mut().find(|t| t.id == thread_id) else {
        return fail(StatusCode::NOT_FOUND, "thread not found");
    };
    let created = Comment {
        id,
        content,
        created_at: Utc::now(),
        owner,
        up_votes_by: vec![],
        down_votes_by: vec![],
    };
    thread.comments.push(created.clone());
    success(StatusCode::CREATED, json!({ "comment": created }))
}

fn vote_kind(kind: &str) -> Option<(VoteState, i8)> {
    match kind {
        "up-vote" => Some((VoteState::Up, 1)),
        "down-vote" => Some((VoteState::Down, -1)),
        "neutral-vote" => Some((VoteState::Neutral, 0)),
        _ => None,
    }
}

async fn vote_thread(
    State(data): State<Shared>,
    Path((thread_id, kind)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut data = lock(&data);
    let Some(user_id) = caller(&mut data, &headers) else {
        return fail(StatusCode::UNAUTHORIZED, "Missing authentication");
    };
    let Some((state, vote_type)) = vote_kind(&kind) else {
        return fail(StatusCode::NOT_FOUND, "route not found");
    };
    if data.reject_votes {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "vote rejected");
    }
    let vote_id = data.fresh_id("vote");
    let Some(thread) = data.threads.iter_mut().find(|t| t.id == thread_id) else {
        return fail(StatusCode::NOT_FOUND, "thread not found");
    };
    thread.set_vote(&user_id, state);
    success(
        StatusCode::OK,
        json!({ "vote": {
            "id": vote_id,
            "userId": user_id,
            "threadId": thread_id,
            "voteType": vote_type,
        }}),
    )
}

async fn vote_comment(
    State(data): State<Shared>,
    Path((thread_id, comment_id, kind)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut data = lock(&data);
    let Some(user_id) = caller(&mut data, &headers) else {
        return fail(StatusCode::UNAUTHORIZED, "Missing authentication");
    };
    let Some((state, vote_type)) = vote_kind(&kind) else {
        return fail(StatusCode::NOT_FOUND, "route not found");
    };
    if data.reject_votes {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "vote rejected");
    }
    let vote_id = data.fresh_id("vote");
    let comment = data
        .threads
        .iter_mut()
        .find(|t| t.id == thread_id)
        .and_then(|t| t.comments.iter_mut().find(|c| c.id == comment_id));
    let Some(comment) = comment else {
        return fail(StatusCode::NOT_FOUND, "comment not found");
    };
    comment.set_vote(&user_id, state);
    success(
        StatusCode::OK,
        json!({ "vote": {
            "id": vote_id,
            "userId": user_id,
            "commentId": comment_id,
            "voteType": vote_type,
        }}),
    )
}

async fn leaderboards(State(data): State<Shared>) -> Response {
    let data = lock(&data);
    success(StatusCode::OK, json!({ "leaderboards": data.leaderboards }))
}
