//! Environment-based client configuration.

use std::env;
use std::time::Duration;

use url::Url;
use voltdesk_core::{AppError, AppResult};

/// Runtime configuration of the central server client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the central server REST API, with a trailing slash.
    pub base_url: Url,
    /// Bearer token presented on every call, if the deployment uses one.
    pub auth_token: Option<String>,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Debounce applied to the change-notification stream.
    pub notification_debounce: Duration,
    /// Maximum accepted profile picture size.
    pub max_picture_kb: u64,
}

impl ClientConfig {
    /// Loads the configuration from the environment (with `.env` support).
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let base_url = required_env("CENTRAL_SERVER_URL")?;
        Self::from_parts(
            base_url.as_str(),
            env::var("CENTRAL_SERVER_TOKEN").ok(),
            env::var("REQUEST_TIMEOUT_MS").ok().as_deref(),
            env::var("NOTIFICATION_DEBOUNCE_MS").ok().as_deref(),
            env::var("MAX_PICTURE_KB").ok().as_deref(),
        )
    }

    /// Builds and validates a configuration from raw values.
    pub fn from_parts(
        base_url: &str,
        auth_token: Option<String>,
        timeout_ms: Option<&str>,
        debounce_ms: Option<&str>,
        max_picture_kb: Option<&str>,
    ) -> AppResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|error| AppError::Unexpected(format!("invalid CENTRAL_SERVER_URL: {error}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Unexpected(format!(
                "CENTRAL_SERVER_URL must be http(s), got '{}'",
                base_url.scheme()
            )));
        }
        // Joining action names replaces the last path segment unless the
        // base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            auth_token: auth_token.filter(|token| !token.trim().is_empty()),
            request_timeout: Duration::from_millis(parse_number(
                "REQUEST_TIMEOUT_MS",
                timeout_ms,
                30_000,
            )?),
            notification_debounce: Duration::from_millis(parse_number(
                "NOTIFICATION_DEBOUNCE_MS",
                debounce_ms,
                500,
            )?),
            max_picture_kb: parse_number("MAX_PICTURE_KB", max_picture_kb, 150)?,
        })
    }
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Unexpected(format!("{name} is not set")))
}

fn parse_number(name: &str, value: Option<&str>, default: u64) -> AppResult<u64> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse::<u64>()
            .map_err(|error| AppError::Unexpected(format!("invalid {name}: {error}"))),
    }
}
