//! Data Protection Core Library
//!
//! Resource lifecycle logic for the data-protection control-plane provider:
//! - Organizational units, backup policies and policy assignments
//! - AWS connections and the S3 / DynamoDB inventory they expose
//! - Report configurations, wallets and callbacks
//!
//! Services work against the capability traits of `dataprotect-provider`, so
//! the HTTP client can be swapped for an in-memory implementation in tests.
//! Deferred (HTTP 202) operations are awaited through the task poller and
//! failures surface as [`Diagnostic`]s.

pub mod diagnostics;
pub mod error;
pub mod services;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use diagnostics::{Diagnostic, Severity};
pub use error::{CoreError, CoreResult};
pub use services::{
    AwsConnectionService, CallbackService, InventoryService, OrganizationalUnitService,
    PolicyAssignmentService, PolicyService, PollSettings, ReportConfigurationService,
    ServiceContext, WalletService,
};
