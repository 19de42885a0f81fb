//! Configuration from environment variables.
//!
//! The service is deployed where the environment is the only configuration
//! surface, so there is no config file. Empty values count as missing.

use thiserror::Error;

pub const ENV_CHANNEL_ACCESS_TOKEN: &str = "LINE_CHANNEL_ACCESS_TOKEN";
pub const ENV_CHANNEL_SECRET: &str = "LINE_CHANNEL_SECRET";
pub const ENV_BEDROCK_REGION: &str = "BEDROCK_REGION";
pub const ENV_BEDROCK_MODEL_ID: &str = "BEDROCK_MODEL_ID";
pub const ENV_BEDROCK_API_KEY: &str = "BEDROCK_API_KEY";
pub const ENV_BIND: &str = "TRANSLINE_BIND";
pub const ENV_PORT: &str = "TRANSLINE_PORT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Full bot configuration. Constructing one means every required credential was
/// present.
#[derive(Debug, Clone)]
pub struct Config {
    pub channel_access_token: String,
    pub channel_secret: String,
    pub bedrock_region: String,
    pub bedrock_model_id: String,
    /// Optional Bedrock API key, sent as a bearer token when set.
    pub bedrock_api_key: Option<String>,
    pub server: ServerConfig,
}

/// HTTP server bind settings. These have defaults and never fail to resolve.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

impl ServerConfig {
    /// Resolve bind/port from TRANSLINE_BIND / TRANSLINE_PORT, falling back to
    /// the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind: env_var(ENV_BIND).unwrap_or(defaults.bind),
            port: env_var(ENV_PORT)
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

impl Config {
    /// Read the full configuration from the environment. Fails on the first
    /// missing required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            channel_access_token: require(ENV_CHANNEL_ACCESS_TOKEN)?,
            channel_secret: require(ENV_CHANNEL_SECRET)?,
            bedrock_region: require(ENV_BEDROCK_REGION)?,
            bedrock_model_id: require(ENV_BEDROCK_MODEL_ID)?,
            bedrock_api_key: env_var(ENV_BEDROCK_API_KEY),
            server: ServerConfig::from_env(),
        })
    }
}

fn env_var(name: &'static str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env_var(name).ok_or(ConfigError::MissingVar(name))
}
