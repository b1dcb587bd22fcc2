use crate::secrets::{resolve_secret, SecretStore};
use crate::session::DEFAULT_BATCH_SIZE;
use crate::translation::language::is_supported;
use crate::translation::{SarvamConfig, TranslationMode, DEFAULT_ENDPOINT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "SARVAM_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config directory")]
    NoConfigDir,

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation API settings
    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Translation API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translate endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key, plaintext or "keyring:<name>". Overridden by SARVAM_API_KEY.
    #[serde(default)]
    pub api_key: String,

    /// Output register: formal, modern-colloquial, classic-colloquial, code-mixed
    #[serde(default)]
    pub mode: TranslationMode,

    #[serde(default = "default_true")]
    pub enable_preprocessing: bool,

    /// Timeout for translation requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,

    /// Concurrent requests when translating a batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            mode: TranslationMode::default(),
            enable_preprocessing: true,
            timeout_secs: default_timeout(),
            batch_size: default_batch_size(),
        }
    }
}

impl TranslationConfig {
    /// Resolve the API key from the environment, keyring or plaintext value.
    ///
    /// An unresolvable key yields an empty string; requests then fail
    /// individually as a configuration error.
    pub fn resolve_api_key(&self) -> String {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return key;
            }
        }
        if self.api_key.trim().is_empty() {
            return String::new();
        }
        match resolve_secret(&self.api_key, &SecretStore::new()) {
            Ok(key) => key,
            Err(e) => {
                warn!("Could not resolve translation API key: {}", e);
                String::new()
            }
        }
    }

    /// Backend settings with the given resolved key.
    pub fn sarvam_config(&self, api_key: String) -> SarvamConfig {
        SarvamConfig {
            endpoint: self.endpoint.clone(),
            api_key,
            mode: self.mode,
            enable_preprocessing: self.enable_preprocessing,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Chat window configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatConfig {
    /// Language selected when a chat opens
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Assistant reply posted after every user message
    #[serde(default = "default_placeholder_reply")]
    pub placeholder_reply: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            placeholder_reply: default_placeholder_reply(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u32 {
    30 // seconds
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_language() -> String {
    "en".to_string()
}

fn default_placeholder_reply() -> String {
    "This is a sample response. Replace with actual API integration.".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("com", "bhasha", "bhasha")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default path, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = &self.translation.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "translation endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }

        if self.translation.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "translation timeout_secs must be positive".into(),
            ));
        }

        if !(1..=64).contains(&self.translation.batch_size) {
            return Err(ConfigError::ValidationError(
                "translation batch_size must be between 1 and 64".into(),
            ));
        }

        if !is_supported(&self.chat.default_language) {
            return Err(ConfigError::ValidationError(format!(
                "unsupported default_language '{}'",
                self.chat.default_language
            )));
        }

        Ok(())
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create config directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Config saved to: {}", path.display());
        Ok(())
    }
}

/// Show current configuration
pub fn show(path: &Path) -> anyhow::Result<()> {
    let config = Config::load_from(path)?;

    println!("Config file: {}\n", path.display());
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}

/// Update configuration
pub fn update(
    path: &Path,
    language: Option<String>,
    endpoint: Option<String>,
    mode: Option<String>,
    batch_size: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;
    let mut changed = false;

    if let Some(lang) = language {
        config.chat.default_language = lang;
        changed = true;
    }

    if let Some(url) = endpoint {
        config.translation.endpoint = url;
        changed = true;
    }

    if let Some(m) = mode {
        config.translation.mode = m.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        changed = true;
    }

    if let Some(size) = batch_size {
        config.translation.batch_size = size;
        changed = true;
    }

    if changed {
        config.validate()?;
        config.save_to(path)?;
        println!("Configuration updated.");
    } else {
        println!("No changes specified. Use --show to view current config.");
    }

    Ok(())
}
