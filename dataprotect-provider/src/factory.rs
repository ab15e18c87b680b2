//! Client factory functions.

use std::sync::Arc;

use crate::client::ControlPlaneClient;
use crate::config::ClientConfig;
use crate::error::Result;

/// Creates a shared [`ControlPlaneClient`] from an explicit configuration.
///
/// The returned client is wrapped in `Arc` so it can be handed to every
/// resource handler as any of the capability traits.
///
/// # Examples
///
/// ```rust,no_run
/// use dataprotect_provider::{create_client, ClientConfig};
///
/// let client = create_client(ClientConfig::new(
///     "https://api.example.com/v1",
///     "your-token",
/// )).unwrap();
/// ```
pub fn create_client(config: ClientConfig) -> Result<Arc<ControlPlaneClient>> {
    ControlPlaneClient::new(config).map(Arc::new)
}

/// Creates a client from the `DATAPROTECT_*` environment variables.
pub fn create_client_from_env() -> Result<Arc<ControlPlaneClient>> {
    create_client(ClientConfig::from_env()?)
}
