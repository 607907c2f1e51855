//! Configuration system (layered: defaults < TOML file < environment).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ChatError, Result};
use crate::history::MAX_HISTORY_LENGTH;
use crate::profile::Profile;

const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models/";
const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";
const DEFAULT_RESPONSE_DELAY_MS: u64 = 1500;

/// Which resolver answers messages.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResolverKind {
    /// Keyword-matched canned replies.
    #[default]
    Canned,
    /// Hosted text-generation endpoint.
    Remote,
}

/// Settings for the hosted text-generation backend.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Base URL; the model id is appended verbatim.
    pub endpoint: String,
    pub model: String,
    pub token: Option<String>,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub timeout_ms: u64,
    pub max_attempts: u32,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            token: None,
            max_new_tokens: 200,
            temperature: 0.7,
            timeout_ms: 30_000,
            max_attempts: 3,
        }
    }
}

impl fmt::Debug for RemoteSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSettings")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("token", &self.token.as_ref().map(|_| ".."))
            .field("max_new_tokens", &self.max_new_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

impl RemoteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Top-level configuration for a chat deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Exchanges (user + assistant pairs) kept as context.
    pub max_history_length: usize,
    /// Artificial delay before a reply is produced.
    pub response_delay_ms: u64,
    pub resolver: ResolverKind,
    pub remote: RemoteSettings,
    pub profile: Profile,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_history_length: MAX_HISTORY_LENGTH,
            response_delay_ms: DEFAULT_RESPONSE_DELAY_MS,
            resolver: ResolverKind::default(),
            remote: RemoteSettings::default(),
            profile: Profile::default(),
        }
    }
}

impl ChatConfig {
    /// Load the full layered configuration.
    ///
    /// An explicit `path` must exist; otherwise the default path is read when
    /// present. Environment variables (and `.env`) are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        base.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Parse a TOML configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ChatError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Location of the per-user configuration file.
    pub fn default_path() -> PathBuf {
        default_chatfolio_dir().join("config.toml")
    }

    /// Overlay environment variables resolved through `lookup`.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup("CHATFOLIO_RESOLVER") {
            self.resolver = kind.trim().parse().map_err(|_| {
                ChatError::Configuration(format!(
                    "CHATFOLIO_RESOLVER must be 'canned' or 'remote', got '{kind}'"
                ))
            })?;
        }
        if let Some(value) = lookup("CHATFOLIO_MAX_HISTORY") {
            self.max_history_length = parse_number("CHATFOLIO_MAX_HISTORY", &value)?;
        }
        if let Some(value) = lookup("CHATFOLIO_RESPONSE_DELAY_MS") {
            self.response_delay_ms = parse_number("CHATFOLIO_RESPONSE_DELAY_MS", &value)?;
        }
        if let Some(endpoint) = lookup("CHATFOLIO_ENDPOINT") {
            self.remote.endpoint = endpoint;
        }
        if let Some(model) = lookup("CHATFOLIO_MODEL") {
            self.remote.model = model;
        }
        if let Some(token) = lookup("CHATFOLIO_TOKEN").or_else(|| lookup("HF_TOKEN")) {
            self.remote.token = Some(token);
        }
        Ok(self)
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ChatError::Configuration(format!("{key} must be a non-negative integer, got '{value}'"))
    })
}

/// `~/.chatfolio`, falling back to a relative directory without a home.
pub(crate) fn default_chatfolio_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".chatfolio"))
        .unwrap_or_else(|| PathBuf::from(".chatfolio"))
}
