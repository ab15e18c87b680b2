//! # dataprotect-provider
//!
//! Client library for a cloud data-protection control-plane API: organizational
//! units, backup policies and their assignments, AWS connections with their S3
//! and DynamoDB inventory, report configurations, wallets and callbacks.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Asynchronous operations
//!
//! Several mutating calls may complete inline (HTTP 200/201) or be accepted as
//! a backend task (HTTP 202). They return a [`Submission`]; a
//! [`Submission::Deferred`] handle is driven to completion with [`await_task`]:
//!
//! ```rust,no_run
//! use dataprotect_provider::{
//!     await_task, create_client, AssignPolicyRequest, ClientConfig, EntityType,
//!     PolicyAssignmentStore, PollOptions, Submission,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_client(ClientConfig::from_env()?)?;
//!
//!     let request = AssignPolicyRequest {
//!         entity_id: "ou-123".to_string(),
//!         entity_type: EntityType::OrganizationalUnit,
//!     };
//!     match client.assign_policy("pol-1", &request).await? {
//!         Submission::Immediate(assignment) => println!("assigned: {assignment:?}"),
//!         Submission::Deferred(handle) => {
//!             await_task(
//!                 client.as_ref(),
//!                 &handle.task_id,
//!                 PollOptions::FAST,
//!                 &CancellationToken::new(),
//!             )
//!             .await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! API calls return [`Result<T, ApiError>`](ApiError); task tracking returns
//! [`TaskError`]. Transient errors (`NetworkError`, `Timeout`, `RateLimited`)
//! are retried with exponential backoff on every call except task status
//! reads.

mod client;
mod config;
mod error;
mod factory;
mod http_client;
mod poller;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiError, Result};

pub use config::{
    ClientConfig, ENV_API_TOKEN, ENV_ENDPOINT, ENV_MAX_RETRIES, ENV_REQUEST_TIMEOUT_SECS,
};

pub use client::ControlPlaneClient;
pub use factory::{create_client, create_client_from_env};

pub use poller::{DEFAULT_POLL_INTERVAL, PollOptions, TaskError, await_task};

// Re-export capability traits (internal error mapping stays private)
pub use traits::{
    AwsConnectionStore, CallbackStore, ControlPlaneApi, InventoryReader, OrganizationalUnitStore,
    PolicyAssignmentStore, PolicyStore, ReportConfigurationStore, TaskReader, WalletStore,
};

pub use types::{
    AssignPolicyRequest, AwsConnection, AwsConnectionRequest, Callback, CallbackKind,
    CallbackRequest, ConnectionStatus, CreateOrganizationalUnitRequest, DynamoDbTable, EntityType,
    ListParams, OrganizationalUnit, PaginatedResponse, Policy, PolicyAssignment, PolicyRequest,
    ReportConfiguration, ReportConfigurationRequest, ReportType, S3Bucket, Submission, Task,
    TaskHandle, TaskStatus, UpdateOrganizationalUnitRequest, Wallet, WalletRequest,
};

// Re-export utils module
pub use utils::datetime;
