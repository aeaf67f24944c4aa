use domains::Comment;
use tracing::{debug, warn};

use super::ForumService;
use crate::actions::Action;
use crate::error::Result;

impl ForumService {
    /// Posts a comment; it is prepended to the open thread once confirmed.
    pub async fn add_comment(&self, thread_id: &str, content: &str) -> Result<Comment> {
        let outcome = self
            .with_loading_bar(self.gateway.create_comment(thread_id, content))
            .await;

        match outcome {
            Ok(comment) => {
                debug!(thread_id, comment_id = %comment.id, "comment created");
                self.store.dispatch(Action::AddComment(comment.clone()));
                Ok(comment)
            }
            Err(err) => {
                warn!(thread_id, error = %err, "failed to create comment");
                self.notifier.notify(&err.to_string());
                Err(err.into())
            }
        }
    }
}
