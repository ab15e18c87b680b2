//! 类型定义模块

mod assignment;

pub use assignment::{AssignmentId, PolicyAssignmentState};

// Re-export provider 库的公共类型
pub use dataprotect_provider::{
    AssignPolicyRequest, AwsConnection, AwsConnectionRequest, Callback, CallbackKind,
    CallbackRequest, ConnectionStatus, CreateOrganizationalUnitRequest, DynamoDbTable, EntityType,
    ListParams, OrganizationalUnit, PaginatedResponse, Policy, PolicyAssignment, PolicyRequest,
    ReportConfiguration, ReportConfigurationRequest, ReportType, S3Bucket, Submission,
    UpdateOrganizationalUnitRequest, Wallet, WalletRequest,
};
