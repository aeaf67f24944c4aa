//! # Store
//!
//! Owns the [`RootState`] and is the only place it changes. Constructed
//! explicitly and shared by `Arc`; there is no global instance.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, watch};
use tracing::trace;

use crate::actions::Action;
use crate::state::RootState;

const ACTION_CHANNEL_CAPACITY: usize = 256;

pub struct Store {
    state: Mutex<RootState>,
    snapshots: watch::Sender<RootState>,
    actions: broadcast::Sender<Action>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(RootState::default())
    }

    /// Starts from a pre-built tree (tests, restored sessions).
    pub fn with_state(state: RootState) -> Self {
        let (snapshots, _) = watch::channel(state.clone());
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(state),
            snapshots,
            actions,
        }
    }

    /// A snapshot of the current tree.
    pub fn state(&self) -> RootState {
        self.lock().clone()
    }

    /// Applies `action` through the root reducer.
    pub fn dispatch(&self, action: Action) {
        let mut state = self.lock();
        self.apply(&mut state, action);
    }

    /// Plans an action against the current tree and dispatches it under the
    /// same lock, so nothing can interleave between reading and writing.
    ///
    /// Nothing is dispatched when `plan` fails.
    pub fn dispatch_with<T, E, F>(&self, plan: F) -> Result<T, E>
    where
        F: FnOnce(&RootState) -> Result<(Action, T), E>,
    {
        let mut state = self.lock();
        let (action, planned) = plan(&state)?;
        self.apply(&mut state, action);
        Ok(planned)
    }

    /// Receives a fresh snapshot after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<RootState> {
        self.snapshots.subscribe()
    }

    /// Receives every dispatched action, in dispatch order.
    pub fn subscribe_actions(&self) -> broadcast::Receiver<Action> {
        self.actions.subscribe()
    }

    fn apply(&self, state: &mut RootState, action: Action) {
        trace!(action = action.name(), "dispatch");
        *state = std::mem::take(state).reduce(&action);
        self.snapshots.send_replace(state.clone());
        // No subscribers is fine.
        let _ = self.actions.send(action);
    }

    fn lock(&self) -> MutexGuard<'_, RootState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
