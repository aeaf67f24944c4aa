//! # File-backed session
//!
//! One file, one bearer token. Survives restarts the way browser storage
//! survives a reload.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domains::{SessionError, SessionStore};
use secrecy::{ExposeSecret, SecretString};
use tokio::fs;
use tracing::debug;

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    /// A missing or blank file means no session.
    async fn get(&self) -> Result<Option<SecretString>, SessionError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(token)))
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, token: SecretString) -> Result<(), SessionError> {
        // 1. Ensure directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // 2. Overwrite the previous token
        fs::write(&self.path, token.expose_secret().as_bytes()).await?;
        debug!(path = %self.path.display(), "session stored");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
