//! # HttpGateway
//!
//! [`ForumGateway`] over HTTP+JSON with `reqwest`.

use std::sync::Arc;

use async_trait::async_trait;
use domains::{
    Comment, Credentials, ForumGateway, GatewayError, LeaderboardEntry, NewThread, Registration,
    SessionStore, Thread, ThreadDetail, User, Vote,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, trace};

use crate::envelope::{
    self, CommentData, DetailThreadData, LeaderboardsData, ThreadData, ThreadsData, TokenData,
    UserData, UsersData, VoteData,
};

pub const DEFAULT_BASE_URL: &str = "https://forum-api.dicoding.dev/v1";

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpGateway {
    /// `session` supplies the bearer token for authenticated endpoints.
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one, so an
    /// id can never add path components of its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(GatewayError::InvalidRequest(format!(
                "{bad:?} is not a valid path segment"
            )));
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GatewayError::InvalidRequest(format!("base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidRequest("base url cannot have a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, GatewayError> {
        Ok(self.client.request(method, self.endpoint(segments)?))
    }

    /// Same as [`request`](Self::request) plus the stored bearer token, if any.
    async fn authorized(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, GatewayError> {
        let builder = self.request(method, segments)?;
        Ok(match self.session.get().await? {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    /// Sends the request and unwraps the envelope. The body is decoded
    /// whatever the HTTP status, since failures carry their message there.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, GatewayError> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await.map_err(transport)?;
        trace!(%status, path = %url, bytes = body.len(), "gateway response");
        envelope::decode(&body)
    }

    async fn vote(&self, segments: &[&str]) -> Result<Vote, GatewayError> {
        debug!(path = %segments.join("/"), "casting vote");
        let builder = self.authorized(Method::POST, segments).await?;
        let data: VoteData = self.send(builder).await?;
        Ok(data.vote)
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

#[async_trait]
impl ForumGateway for HttpGateway {
    async fn register(&self, registration: &Registration) -> Result<User, GatewayError> {
        let builder = self.request(Method::POST, &["register"])?.json(registration);
        let data: UserData = self.send(builder).await?;
        Ok(data.user)
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, GatewayError> {
        let builder = self.request(Method::POST, &["login"])?.json(credentials);
        let data: TokenData = self.send(builder).await?;
        Ok(data.token)
    }

    async fn get_own_profile(&self) -> Result<User, GatewayError> {
        let builder = self.authorized(Method::GET, &["users", "me"]).await?;
        let data: UserData = self.send(builder).await?;
        Ok(data.user)
    }

    async fn get_all_users(&self) -> Result<Vec<User>, GatewayError> {
        let data: UsersData = self.send(self.request(Method::GET, &["users"])?).await?;
        Ok(data.users)
    }

    async fn get_all_threads(&self) -> Result<Vec<Thread>, GatewayError> {
        let data: ThreadsData = self.send(self.request(Method::GET, &["threads"])?).await?;
        Ok(data.threads)
    }

    async fn get_thread_detail(&self, thread_id: &str) -> Result<ThreadDetail, GatewayError> {
        let builder = self.request(Method::GET, &["threads", thread_id])?;
        let data: DetailThreadData = self.send(builder).await?;
        Ok(data.detail_thread)
    }

    async fn create_thread(&self, thread: &NewThread) -> Result<Thread, GatewayError> {
        let builder = self.authorized(Method::POST, &["threads"]).await?.json(thread);
        let data: ThreadData = self.send(builder).await?;
        Ok(data.thread)
    }

    async fn create_comment(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<Comment, GatewayError> {
        let builder = self
            .authorized(Method::POST, &["threads", thread_id, "comments"])
            .await?
            .json(&json!({ "content": content }));
        let data: CommentData = self.send(builder).await?;
        Ok(data.comment)
    }

    async fn upvote_thread(&self, thread_id: &str) -> Result<Vote, GatewayError> {
        self.vote(&["threads", thread_id, "up-vote"]).await
    }

    async fn downvote_thread(&self, thread_id: &str) -> Result<Vote, GatewayError> {
        self.vote(&["threads", thread_id, "down-vote"]).await
    }

    async fn neutral_vote_thread(&self, thread_id: &str) -> Result<Vote, GatewayError> {
        self.vote(&["threads", thread_id, "neutral-vote"]).await
    }

    async fn upvote_comment(&self, thread_id: &str, comment_id: &str) -> Result<Vote, GatewayError> {
        self.vote(&["threads", thread_id, "comments", comment_id, "up-vote"])
            .await
    }

    async fn downvote_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
    ) -> Result<Vote, GatewayError> {
        self.vote(&["threads", thread_id, "comments", comment_id, "down-vote"])
            .await
    }

    async fn neutral_vote_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
    ) -> Result<Vote, GatewayError> {
        self.vote(&["threads", thread_id, "comments", comment_id, "neutral-vote"])
            .await
    }

    async fn get_leaderboards(&self) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        let data: LeaderboardsData = self
            .send(self.request(Method::GET, &["leaderboards"])?)
            .await?;
        Ok(data.leaderboards)
    }
}
