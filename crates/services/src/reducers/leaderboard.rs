use crate::actions::Action;
use crate::state::LeaderboardState;

pub fn reduce(state: LeaderboardState, action: &Action) -> LeaderboardState {
    match action {
        Action::ReceiveLeaderboards(leaderboards) => LeaderboardState {
            leaderboards: leaderboards.clone(),
            ..state
        },
        Action::SetLeaderboardLoading(is_loading) => LeaderboardState {
            is_loading: *is_loading,
            ..state
        },
        Action::SetLeaderboardError(error) => LeaderboardState {
            error: error.clone(),
            ..state
        },
        _ => state,
    }
}
