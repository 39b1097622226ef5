use std::time::Duration;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_CLOUDNET_API_URL: &str = "http://localhost:8080/api/v3";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

pub struct Config {
    /// Shared credential the panel-auth seam validates bearer tokens against.
    pub panel_api_token: String,

    pub cloudnet: CloudNetConfig,
}

/// Settings for the CloudNet REST API integration.
///
/// When `enabled` is false the panel never attempts a network call to
/// CloudNet; every gated request short-circuits into the disabled response.
#[derive(Clone)]
pub struct CloudNetConfig {
    pub enabled: bool,
    pub base_url: String,

    /// Static API key used directly as the bearer credential. Takes
    /// precedence over the basic-auth token lifecycle when set.
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            panel_api_token: std::env::var("PANEL_API_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("PANEL_API_TOKEN".to_string()))?,
            cloudnet: CloudNetConfig::from_env()?,
        })
    }
}

impl CloudNetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: std::env::var("CLOUDNET_API_ENABLED")
                .map(|v| v == "true")
                .unwrap_or(false),
            base_url: std::env::var("CLOUDNET_API_URL")
                .unwrap_or_else(|_| DEFAULT_CLOUDNET_API_URL.to_string()),
            api_key: std::env::var("CLOUDNET_API_KEY").ok(),
            username: std::env::var("CLOUDNET_API_USERNAME").ok(),
            password: std::env::var("CLOUDNET_API_PASSWORD").ok(),
            timeout: Duration::from_millis(parse_env_u64(
                "CLOUDNET_API_TIMEOUT",
                DEFAULT_TIMEOUT_MS,
            )?),
            retries: parse_env_u64("CLOUDNET_API_RETRIES", u64::from(DEFAULT_RETRIES))? as u32,
            retry_delay: Duration::from_millis(parse_env_u64(
                "CLOUDNET_API_RETRY_DELAY",
                DEFAULT_RETRY_DELAY_MS,
            )?),
        })
    }
}

/// Reads an optional numeric environment variable, falling back to `default`
/// when unset and failing on unparseable values.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
