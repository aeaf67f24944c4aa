use tracing::warn;

use super::ForumService;
use crate::actions::Action;
use crate::error::Result;

impl ForumService {
    pub async fn fetch_users(&self) -> Result<()> {
        self.store.dispatch(Action::SetUsersLoading(true));
        let outcome = self.with_loading_bar(self.gateway.get_all_users()).await;

        let result = match outcome {
            Ok(users) => {
                self.store.dispatch(Action::ReceiveUsers(users));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load users");
                self.store
                    .dispatch(Action::SetUsersError(Some(err.to_string())));
                Err(err.into())
            }
        };
        self.store.dispatch(Action::SetUsersLoading(false));
        result
    }
}
