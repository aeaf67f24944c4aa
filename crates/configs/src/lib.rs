//! forum-client/crates/configs/src/lib.rs
//!
//! Layered settings: built-in defaults, then `config/forum.*`, then `.env`,
//! then `FORUM__SECTION__KEY` environment variables.

use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://forum-api.dicoding.dev/v1";
pub const DEFAULT_SESSION_PATH: &str = ".forum-client/session";
const CONFIG_FILE: &str = "config/forum";
const ENV_PREFIX: &str = "FORUM";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("api.base_url must be an http(s) URL, got `{0}`")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    pub backend: SessionBackend,
    pub path: PathBuf,
    /// Seeds the session store at startup when set.
    #[serde(default, deserialize_with = "optional_secret")]
    pub access_token: Option<SecretString>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    Memory,
    File,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive, e.g. `info,services=debug`.
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

fn optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|token| !token.trim().is_empty())
        .map(SecretString::from))
}

impl Settings {
    /// Loads settings from the process environment and working directory.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(environment());
        Self::build(builder)
    }

    /// Loads settings from a TOML document layered over the defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from_str(source, FileFormat::Toml));
        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("session.backend", "file")?
            .set_default("session.path", DEFAULT_SESSION_PATH)?
            .set_default("log.filter", "info")?
            .set_default("log.format", "pretty")?
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.as_str();
        let host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match host {
            Some(rest) if !rest.is_empty() => Ok(()),
            _ => Err(ConfigError::InvalidBaseUrl(url.to_string())),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}
