//! Configuration management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Environment variable holding the bot token
pub const TOKEN_ENV: &str = "BOT_TOKEN";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Ekehi Task Bot".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TelegramConfig {
    /// Never written back out
    #[serde(skip_serializing)]
    pub token: Option<BotToken>,
    /// Long-poll timeout passed to getUpdates
    pub poll_timeout_seconds: u64,
    /// Pause before polling again after getUpdates fails
    pub poll_error_delay_seconds: u64,
    /// Publish the command list with setMyCommands on startup
    pub register_commands: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            poll_timeout_seconds: 30,
            poll_error_delay_seconds: 5,
            register_commands: true,
        }
    }
}

/// Bot API credential. Formatting never reveals the value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BotToken(String);

impl BotToken {
    /// Wrap a token, treating blank input as absent
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        (!token.is_empty()).then_some(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(<redacted>)")
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        // Blank `token:` entries behave like a missing token
        config.telegram.token = config.telegram.token.and_then(|t| BotToken::new(t.0));
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if it exists, otherwise start from defaults
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply the token from the environment, then from an explicit override
    pub fn apply_token_overrides(&mut self, env_token: Option<String>, cli_token: Option<String>) {
        for token in [env_token, cli_token].into_iter().flatten() {
            if let Some(token) = BotToken::new(token) {
                self.telegram.token = Some(token);
            }
        }
    }

    /// Token from `BOT_TOKEN`, if set
    pub fn env_token() -> Option<String> {
        std::env::var(TOKEN_ENV).ok()
    }

    pub fn token(&self) -> Result<&BotToken, ConfigError> {
        self.telegram.token.as_ref().ok_or(ConfigError::MissingToken)
    }
}
