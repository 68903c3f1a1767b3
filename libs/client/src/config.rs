use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Where the API lives and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without the `/api` suffix
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl FromEnv for ClientConfig {
    /// - `BACKEND_URL` (default: `http://localhost:5000`)
    /// - `BACKEND_TIMEOUT_SECS` (default: 15)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_or_default("BACKEND_URL", DEFAULT_BACKEND_URL),
            timeout: Duration::from_secs(env_parse("BACKEND_TIMEOUT_SECS", 15)?),
        })
    }
}
