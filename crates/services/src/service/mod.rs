//! # ForumService
//!
//! Command handlers coordinating the Gateway, the session store and the
//! [`Store`]. Every dependency is injected; there is no hidden shared state.

mod auth;
mod comments;
mod leaderboard;
mod threads;
mod users;
pub mod votes;

#[cfg(test)]
mod fixtures;

use std::future::Future;
use std::sync::Arc;

use domains::{ForumGateway, Notifier, SessionStore};

use crate::actions::Action;
use crate::store::Store;

pub use votes::{VoteIntent, VotePlan, VoteTarget};

/// Shared by every front end; cheap to clone.
#[derive(Clone)]
pub struct ForumService {
    store: Arc<Store>,
    gateway: Arc<dyn ForumGateway>,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl ForumService {
    pub fn new(
        store: Arc<Store>,
        gateway: Arc<dyn ForumGateway>,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            gateway,
            session,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Shows the global loading bar for the duration of `work`.
    async fn with_loading_bar<F, T>(&self, work: F) -> T
    where
        F: Future<Output = T>,
    {
        self.store.dispatch(Action::ShowLoading);
        let _bar = LoadingBar { store: &self.store };
        work.await
    }
}

/// Hides the loading bar when dropped, so a cancelled command still balances it.
struct LoadingBar<'a> {
    store: &'a Store,
}

impl Drop for LoadingBar<'_> {
    fn drop(&mut self) {
        self.store.dispatch(Action::HideLoading);
    }
}
