use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// The AI endpoint and token are optional at startup: requests that need them
/// fail with a configuration error instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai_endpoint: Option<String>,
    pub auth_token: Option<String>,
    pub ai_timeout: Option<Duration>,
    pub port: u16,
    pub max_body_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ai_endpoint: optional_env("AI_ENDPOINT"),
            auth_token: optional_env("AUTH_TOKEN"),
            ai_timeout: optional_env("AI_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("AI_TIMEOUT_SECS must be a whole number of seconds")?,
            port: optional_env("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(DEFAULT_PORT),
            max_body_bytes: optional_env("MAX_BODY_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_BODY_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Both values needed to reach the generation service, if configured.
    pub fn ai_credentials(&self) -> Option<(&str, &str)> {
        match (self.ai_endpoint.as_deref(), self.auth_token.as_deref()) {
            (Some(endpoint), Some(token)) => Some((endpoint, token)),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ai_endpoint: None,
            auth_token: None,
            ai_timeout: None,
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            rust_log: "info".to_string(),
        }
    }
}

/// Blank values are treated the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
