use crate::actions::Action;
use crate::state::UsersState;

pub fn reduce(state: UsersState, action: &Action) -> UsersState {
    match action {
        Action::ReceiveUsers(users) => UsersState {
            users: users.clone(),
            ..state
        },
        Action::SetUsersLoading(is_loading) => UsersState {
            is_loading: *is_loading,
            ..state
        },
        Action::SetUsersError(error) => UsersState {
            error: error.clone(),
            ..state
        },
        _ => state,
    }
}
