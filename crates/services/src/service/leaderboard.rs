use tracing::warn;

use super::ForumService;
use crate::actions::Action;
use crate::error::Result;

impl ForumService {
    pub async fn fetch_leaderboards(&self) -> Result<()> {
        self.store.dispatch(Action::SetLeaderboardLoading(true));
        let outcome = self.with_loading_bar(self.gateway.get_leaderboards()).await;

        let result = match outcome {
            Ok(leaderboards) => {
                self.store.dispatch(Action::ReceiveLeaderboards(leaderboards));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load leaderboard");
                self.store
                    .dispatch(Action::SetLeaderboardError(Some(err.to_string())));
                Err(err.into())
            }
        };
        self.store.dispatch(Action::SetLeaderboardLoading(false));
        result
    }
}
