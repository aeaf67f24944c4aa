use crate::actions::Action;
use crate::state::AuthState;

/// Anonymous ⇄ Authenticated, with an orthogonal error flag.
pub fn reduce(state: AuthState, action: &Action) -> AuthState {
    match action {
        Action::SetAuthUser(user) => AuthState {
            auth_user: user.clone(),
            is_authenticated: user.is_some(),
            is_auth_error: false,
            auth_error_message: String::new(),
        },
        // The error flag survives a logout; only CLEAR_AUTH_ERROR resets it.
        Action::UnsetAuthUser => AuthState {
            auth_user: None,
            is_authenticated: false,
            ..state
        },
        Action::SetAuthError(message) => AuthState {
            is_auth_error: true,
            auth_error_message: message.clone(),
            ..state
        },
        Action::ClearAuthError => AuthState {
            is_auth_error: false,
            auth_error_message: String::new(),
            ..state
        },
        _ => state,
    }
}
