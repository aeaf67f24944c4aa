use async_trait::async_trait;
use domains::{SessionError, SessionStore};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

/// Keeps the token for the lifetime of the process.
#[derive(Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<SecretString>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a token already stored.
    pub fn with_token(token: SecretString) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<Option<SecretString>, SessionError> {
        let token = self.token.read().await;
        Ok(token
            .as_ref()
            .map(|t| SecretString::from(t.expose_secret())))
    }

    async fn set(&self, token: SecretString) -> Result<(), SessionError> {
        *self.token.write().await = Some(token);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.token.write().await = None;
        Ok(())
    }
}
