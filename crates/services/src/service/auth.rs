//! Registration, login, logout and session preload.

use domains::{Credentials, Registration, User};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use super::ForumService;
use crate::actions::Action;
use crate::error::Result;

impl ForumService {
    /// Creates an account. The new user is not logged in.
    pub async fn register(&self, registration: Registration) -> Result<User> {
        let outcome = self
            .with_loading_bar(self.gateway.register(&registration))
            .await;

        match outcome {
            Ok(user) => {
                info!(user_id = %user.id, "registered");
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "registration failed");
                self.store.dispatch(Action::SetAuthError(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Exchanges credentials for a token, persists it, then loads the profile.
    pub async fn login(&self, credentials: Credentials) -> Result<User> {
        let outcome = self.with_loading_bar(self.login_inner(&credentials)).await;

        match outcome {
            Ok(user) => {
                info!(user_id = %user.id, "logged in");
                self.store.dispatch(Action::SetAuthUser(Some(user.clone())));
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.store.dispatch(Action::SetAuthError(err.to_string()));
                Err(err)
            }
        }
    }

    async fn login_inner(&self, credentials: &Credentials) -> Result<User> {
        let token = self.gateway.login(credentials).await?;
        self.session.set(SecretString::from(token)).await?;
        Ok(self.gateway.get_own_profile().await?)
    }

    /// Restores the logged-in user from a stored credential.
    ///
    /// Failures are silent: the credential is dropped and the store goes
    /// back to anonymous.
    pub async fn preload_session(&self) -> Option<User> {
        let outcome = self.with_loading_bar(self.preload_inner()).await;

        match outcome {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "session restored");
                self.store.dispatch(Action::SetAuthUser(Some(user.clone())));
                Some(user)
            }
            Ok(None) => {
                debug!("no stored session");
                self.store.dispatch(Action::UnsetAuthUser);
                None
            }
            Err(err) => {
                debug!(error = %err, "stored session rejected");
                if let Err(err) = self.session.clear().await {
                    warn!(error = %err, "failed to clear stored session");
                }
                self.store.dispatch(Action::UnsetAuthUser);
                None
            }
        }
    }

    async fn preload_inner(&self) -> Result<Option<User>> {
        if self.session.get().await?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.gateway.get_own_profile().await?))
    }

    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await?;
        self.store.dispatch(Action::UnsetAuthUser);
        info!("logged out");
        Ok(())
    }

    pub fn clear_auth_error(&self) {
        self.store.dispatch(Action::ClearAuthError);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::service::fixtures::*;
    use crate::state::RootState;
    use domains::{GatewayError, MockForumGateway, MockNotifier, MockSessionStore, SessionError};
    use secrecy::ExposeSecret;

    fn credentials() -> Credentials {
        Credentials {
            email: "john@example.com".into(),
            password: "password123".into(),
        }
    }

    #[tokio::test]
    async fn login_stores_token_and_sets_user() {
        let mut gateway = MockForumGateway::new();
        gateway
            .expect_login()
            .withf(|c| c.email == "john@example.com" && c.password == "password123")
            .times(1)
            .returning(|_| Ok("fake-token".into()));
        gateway
            .expect_get_own_profile()
            .times(1)
            .returning(|| Ok(user(USER_ID)));
        let mut session = MockSessionStore::new();
        session
            .expect_set()
            .withf(|token| token.expose_secret() == "fake-token")
            .times(1)
            .returning(|_| Ok(()));

        let (service, store) =
            service_with_session(gateway, session, MockNotifier::new(), RootState::default());
        let mut actions = store.subscribe_actions();

        let logged_in = service.login(credentials()).await.unwrap();

        assert_eq!(logged_in, user(USER_ID));
        assert_eq!(
            drain(&mut actions),
            vec![
                Action::ShowLoading,
                Action::HideLoading,
                Action::SetAuthUser(Some(user(USER_ID))),
            ]
        );
        assert!(store.state().auth.is_authenticated);
    }

    #[tokio::test]
    async fn login_failure_sets_auth_error() {
        let mut gateway = MockForumGateway::new();
        gateway
            .expect_login()
            .returning(|_| Err(GatewayError::Rejected("email or password is wrong".into())));
        gateway.expect_get_own_profile().never();
        let mut session = MockSessionStore::new();
        session.expect_set().never();

        let (service, store) =
            service_with_session(gateway, session, MockNotifier::new(), RootState::default());

        let result = service.login(credentials()).await;

        assert!(matches!(result, Err(ServiceError::Gateway(_))));
        let auth = store.state().auth;
        assert!(!auth.is_authenticated);
        assert!(auth.is_auth_error);
        assert_eq!(auth.auth_error_message, "email or password is wrong");
        assert_eq!(store.state().loading_bar, 0);
    }

    #[tokio::test]
    async fn register_returns_user_without_logging_in() {
        let mut gateway = MockForumGateway::new();
        gateway
            .expect_register()
            .withf(|r| r.name == "John Doe")
            .times(1)
            .returning(|_| Ok(user("user-new")));

        let (service, store) =
            service_with(gateway, MockNotifier::new(), RootState::default());

        let registered = service
            .register(Registration {
                name: "John Doe".into(),
                email: "john@example.com".into(),
                password: "password123".into(),
            })
            .await
            .unwrap();

        assert_eq!(registered.id, "user-new");
        assert!(!store.state().auth.is_authenticated);
    }

    #[tokio::test]
    async fn register_failure_sets_auth_error() {
        let mut gateway = MockForumGateway::new();
        gateway
            .expect_register()
            .returning(|_| Err(GatewayError::Rejected("email is already taken".into())));

        let (service, store) =
            service_with(gateway, MockNotifier::new(), RootState::default());

        tokio_test::assert_err!(
            service
                .register(Registration {
                    name: "John Doe".into(),
                    email: "john@example.com".into(),
                    password: "password123".into(),
                })
                .await
        );
        assert_eq!(store.state().auth.auth_error_message, "email is already taken");
    }

    #[tokio::test]
    async fn preload_with_valid_token_sets_user() {
        let mut gateway = MockForumGateway::new();
        gateway
            .expect_get_own_profile()
            .times(1)
            .returning(|| Ok(user(USER_ID)));
        let mut session = MockSessionStore::new();
        session
            .expect_get()
            .returning(|| Ok(Some(SecretString::from("stored-token"))));
        session.expect_clear().never();

        let (service, store) =
            service_with_session(gateway, session, MockNotifier::new(), RootState::default());

        assert_eq!(service.preload_session().await, Some(user(USER_ID)));
        assert!(store.state().auth.is_authenticated);
    }

    #[tokio::test]
    async fn preload_failure_clears_token_silently() {
        let mut gateway = MockForumGateway::new();
        gateway
            .expect_get_own_profile()
            .returning(|| Err(GatewayError::Rejected("access token not valid".into())));
        let mut session = MockSessionStore::new();
        session
            .expect_get()
            .returning(|| Ok(Some(SecretString::from("expired"))));
        session.expect_clear().times(1).returning(|| Ok(()));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let (service, store) =
            service_with_session(gateway, session, notifier, logged_in_state());
        let mut actions = store.subscribe_actions();

        assert_eq!(service.preload_session().await, None);
        assert!(!store.state().auth.is_authenticated);
        assert!(!store.state().auth.is_auth_error);
        assert_eq!(
            drain(&mut actions),
            vec![Action::ShowLoading, Action::HideLoading, Action::UnsetAuthUser]
        );
    }

    #[tokio::test]
    async fn preload_without_token_skips_the_gateway() {
        let mut gateway = MockForumGateway::new();
        gateway.expect_get_own_profile().never();
        let mut session = MockSessionStore::new();
        session.expect_get().returning(|| Ok(None));

        let (service, store) =
            service_with_session(gateway, session, MockNotifier::new(), RootState::default());

        assert_eq!(service.preload_session().await, None);
        assert!(store.state().auth.auth_user.is_none());
    }

    #[tokio::test]
    async fn preload_survives_unreadable_session_storage() {
        let mut gateway = MockForumGateway::new();
        gateway.expect_get_own_profile().never();
        let mut session = MockSessionStore::new();
        session
            .expect_get()
            .returning(|| Err(SessionError::Unavailable("locked".into())));
        session
            .expect_clear()
            .returning(|| Err(SessionError::Unavailable("locked".into())));

        let (service, store) =
            service_with_session(gateway, session, MockNotifier::new(), RootState::default());

        assert_eq!(service.preload_session().await, None);
        assert!(!store.state().auth.is_authenticated);
    }

    #[tokio::test]
    async fn logout_clears_session_and_user() {
        let mut session = MockSessionStore::new();
        session.expect_clear().times(1).returning(|| Ok(()));

        let (service, store) = service_with_session(
            MockForumGateway::new(),
            session,
            MockNotifier::new(),
            logged_in_state(),
        );

        tokio_test::assert_ok!(service.logout().await);
        assert!(store.state().auth.auth_user.is_none());
    }

    #[test]
    fn clear_auth_error_dispatches() {
        let (service, store) = service_with(
            MockForumGateway::new(),
            MockNotifier::new(),
            RootState::default().reduce(&Action::SetAuthError("bad".into())),
        );
        service.clear_auth_error();
        assert!(!store.state().auth.is_auth_error);
    }
}
