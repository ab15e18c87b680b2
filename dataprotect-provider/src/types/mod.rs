//! Wire models for the control-plane API.
//!
//! Field names follow the API's snake_case JSON. Optional fields are skipped
//! when serializing requests so the backend applies its own defaults.

mod aws;
mod common;
mod organization;
mod reporting;
mod task;

pub use aws::{
    AwsConnection, AwsConnectionRequest, ConnectionStatus, DynamoDbTable, S3Bucket,
};
pub use common::{ListParams, PaginatedResponse, Submission, TaskHandle};
pub use organization::{
    AssignPolicyRequest, CreateOrganizationalUnitRequest, EntityType, OrganizationalUnit, Policy,
    PolicyAssignment, PolicyRequest, UpdateOrganizationalUnitRequest,
};
pub use reporting::{
    Callback, CallbackKind, CallbackRequest, ReportConfiguration, ReportConfigurationRequest,
    ReportType, Wallet, WalletRequest,
};
pub use task::{Task, TaskStatus};
