//! Control-plane REST client

mod api;
mod error;
mod http;

use std::borrow::Cow;

use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::utils::log_sanitizer::mask_secret;

/// HTTP client for the control-plane API.
///
/// Implements every capability trait in [`crate::traits`]. Cheap to share
/// behind an `Arc`; the inner `reqwest::Client` pools connections.
pub struct ControlPlaneClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
}

impl ControlPlaneClient {
    /// Build a client from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::InvalidConfig {
                field: "http_client".to_string(),
                detail: e.to_string(),
            })?;

        log::info!(
            "Control-plane client ready: endpoint={}, token={}, max_retries={}",
            config.endpoint,
            mask_secret(&config.api_token),
            config.max_retries
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }
}

/// Percent-encode a single path segment (ids, bucket and table names).
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}
