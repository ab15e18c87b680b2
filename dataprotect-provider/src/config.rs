//! Client configuration.
//!
//! A [`ClientConfig`] is an explicit value built once at startup and passed to
//! [`create_client`](crate::create_client). Nothing here is process-global.

use std::time::Duration;

use crate::error::{ApiError, Result};

/// Environment variable holding the control-plane base URL.
pub const ENV_ENDPOINT: &str = "DATAPROTECT_ENDPOINT";
/// Environment variable holding the API bearer token.
pub const ENV_API_TOKEN: &str = "DATAPROTECT_API_TOKEN";
/// Environment variable overriding the retry budget for ordinary calls.
pub const ENV_MAX_RETRIES: &str = "DATAPROTECT_MAX_RETRIES";
/// Environment variable overriding the per-request timeout, in seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "DATAPROTECT_REQUEST_TIMEOUT_SECS";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default retry budget for transient failures on ordinary calls.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Connection settings for the control-plane API.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://api.example.com/v1`. Trailing slashes are stripped.
    pub endpoint: String,
    /// Bearer token sent with every request.
    pub api_token: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// Retries for transient failures. Task status reads ignore this and never retry.
    pub max_retries: u32,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Start a configuration with default timeouts and retry budget.
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: concat!("dataprotect-provider/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Load the configuration from `DATAPROTECT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENV_ENDPOINT).ok_or_else(|| missing(ENV_ENDPOINT))?;
        let api_token = lookup(ENV_API_TOKEN).ok_or_else(|| missing(ENV_API_TOKEN))?;

        let mut config = Self::new(endpoint, api_token);

        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = raw.trim().parse().map_err(|e| ApiError::InvalidConfig {
                field: ENV_MAX_RETRIES.to_string(),
                detail: format!("{e}"),
            })?;
        }

        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| ApiError::InvalidConfig {
                field: ENV_REQUEST_TIMEOUT_SECS.to_string(),
                detail: format!("{e}"),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check that the configuration can produce a working client.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(missing("endpoint"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ApiError::InvalidConfig {
                field: "endpoint".to_string(),
                detail: format!("must be an http(s) URL, got '{}'", self.endpoint),
            });
        }
        if self.api_token.trim().is_empty() {
            return Err(missing("api_token"));
        }
        if self.request_timeout.is_zero() {
            return Err(ApiError::InvalidConfig {
                field: "request_timeout".to_string(),
                detail: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::InvalidConfig {
        field: field.to_string(),
        detail: "value is required".to_string(),
    }
}
