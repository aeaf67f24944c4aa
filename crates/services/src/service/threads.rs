//! Thread list, thread detail and thread creation.

use domains::{NewThread, Thread, ThreadDetail, User};
use tracing::{debug, warn};

use super::ForumService;
use crate::actions::Action;
use crate::error::Result;

impl ForumService {
    /// Loads every thread and attaches its owner from the user list.
    ///
    /// A thread whose owner is unknown keeps `owner: None`.
    pub async fn fetch_all_threads(&self) -> Result<()> {
        self.store.dispatch(Action::SetIsLoading(true));
        let outcome = self
            .with_loading_bar(async {
                tokio::try_join!(self.gateway.get_all_threads(), self.gateway.get_all_users())
            })
            .await;

        let result = match outcome {
            Ok((threads, users)) => {
                debug!(threads = threads.len(), users = users.len(), "threads loaded");
                self.store
                    .dispatch(Action::ReceiveThreads(attach_owners(threads, &users)));
                self.store.dispatch(Action::SetError(None));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load threads");
                self.store.dispatch(Action::SetError(Some(err.to_string())));
                Err(err.into())
            }
        };
        self.store.dispatch(Action::SetIsLoading(false));
        result
    }

    pub async fn fetch_thread_detail(&self, thread_id: &str) -> Result<ThreadDetail> {
        self.store.dispatch(Action::SetIsLoading(true));
        let outcome = self
            .with_loading_bar(self.gateway.get_thread_detail(thread_id))
            .await;

        let result = match outcome {
            Ok(detail) => {
                debug!(thread_id, comments = detail.comments.len(), "thread detail loaded");
                self.store
                    .dispatch(Action::ReceiveThreadDetail(Some(detail.clone())));
                self.store.dispatch(Action::SetError(None));
                Ok(detail)
            }
            Err(err) => {
                warn!(thread_id, error = %err, "failed to load thread detail");
                self.store.dispatch(Action::SetError(Some(err.to_string())));
                Err(err.into())
            }
        };
        self.store.dispatch(Action::SetIsLoading(false));
        result
    }

    /// Posts a thread and prepends the Gateway's copy once confirmed.
    pub async fn create_thread(&self, thread: NewThread) -> Result<Thread> {
        let outcome = self
            .with_loading_bar(self.gateway.create_thread(&thread))
            .await;

        match outcome {
            Ok(created) => {
                debug!(thread_id = %created.id, "thread created");
                self.store.dispatch(Action::AddThread(created.clone()));
                Ok(created)
            }
            Err(err) => {
                warn!(error = %err, "failed to create thread");
                self.notifier.notify(&err.to_string());
                Err(err.into())
            }
        }
    }

    pub fn set_filter_category(&self, category: impl Into<String>) {
        self.store.dispatch(Action::SetFilterCategory(category.into()));
    }
}

fn attach_owners(threads: Vec<Thread>, users: &[User]) -> Vec<Thread> {
    threads
        .into_iter()
        .map(|mut thread| {
            thread.owner = users.iter().find(|u| u.id == thread.owner_id).cloned();
            thread
        })
        .collect()
}
