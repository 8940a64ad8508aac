//! Relay configuration loading from file and environment variables.

use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Environment variable holding the provider bearer credential.
pub const API_KEY_ENV: &str = "RETELL_API_KEY";

/// Top-level relay configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream voice-AI provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Path of the file the settings were read from. `None` when defaults
    /// were used because no file was given or it did not exist.
    #[serde(skip)]
    pub loaded_from: Option<String>,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix under which the routes are mounted in addition to the root,
    /// matching the path the browser client calls (e.g. `/api/create-web-call`).
    /// Empty disables the prefixed mount.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

/// Provider endpoint and credential.
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider REST API.
    #[serde(default = "default_provider_url")]
    pub base_url: String,

    /// Bearer credential. Only ever read from the environment.
    #[serde(skip)]
    pub api_key: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "voicecall_relay=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_provider_url() -> String {
    "https://api.retellai.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            api_key: String::new(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The provider credential is absent or empty.
    #[error("RETELL_API_KEY is not set; the relay cannot start without a provider credential")]
    MissingApiKey,
}

/// Loads configuration from a TOML file and the process environment.
///
/// See [`load_config_with`] for the recognised variables.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed, or
/// if the provider credential is missing.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Loads configuration, resolving environment variables through `env`.
///
/// Environment variable overrides:
/// - `VOICECALL_HOST` overrides `server.host`
/// - `VOICECALL_PORT` overrides `server.port`
/// - `VOICECALL_PROVIDER_URL` overrides `provider.base_url`
/// - `VOICECALL_LOG_LEVEL` overrides `logging.level`
/// - `VOICECALL_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// `RETELL_API_KEY` is required and supplies `provider.api_key`.
pub fn load_config_with<F>(path: Option<&str>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => Config {
                loaded_from: Some(p.to_string()),
                ..toml::from_str(&contents)?
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    if let Some(host) = env("VOICECALL_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = env("VOICECALL_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(url) = env("VOICECALL_PROVIDER_URL") {
        config.provider.base_url = url;
    }
    if let Some(level) = env("VOICECALL_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env("VOICECALL_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    config.provider.api_key = env(API_KEY_ENV)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    Ok(config)
}
