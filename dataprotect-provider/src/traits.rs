//! Capability traits.
//!
//! One narrow trait per endpoint group so resource code depends only on the
//! calls it makes and tests can substitute in-memory fakes.
//! [`ControlPlaneClient`](crate::ControlPlaneClient) implements all of them.

use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::types::{
    AssignPolicyRequest, AwsConnection, AwsConnectionRequest, Callback, CallbackRequest,
    CreateOrganizationalUnitRequest, DynamoDbTable, ListParams, OrganizationalUnit,
    PaginatedResponse, Policy, PolicyAssignment, PolicyRequest, ReportConfiguration,
    ReportConfigurationRequest, S3Bucket, Submission, Task, UpdateOrganizationalUnitRequest,
    Wallet, WalletRequest,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status code
    pub status: u16,
    /// Error code from the `{"error": {"code": ..}}` envelope, if any
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
///
/// Names the object a request addressed so 404/409 map to a useful message.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Kind of object, e.g. `policy`
    pub resource: Option<String>,
    /// Identifier of the object
    pub id: Option<String>,
}

impl ErrorContext {
    pub fn new(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
            id: Some(id.into()),
        }
    }

    pub fn for_kind(resource: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
            id: None,
        }
    }
}

/// 错误映射 Trait（内部使用）
pub(crate) trait ErrorMapper {
    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ApiError {
        ApiError::ParseError {
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ApiError {
        ApiError::Unknown {
            status: Some(raw.status),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Reads backend task records.
#[async_trait]
pub trait TaskReader: Send + Sync {
    /// Fetch the current state of a task. Never retried on transport errors.
    async fn read_task(&self, task_id: &str) -> Result<Task>;
}

#[async_trait]
pub trait OrganizationalUnitStore: Send + Sync {
    async fn list_organizational_units(
        &self,
        params: &ListParams,
    ) -> Result<PaginatedResponse<OrganizationalUnit>>;

    async fn get_organizational_unit(&self, id: &str) -> Result<OrganizationalUnit>;

    async fn create_organizational_unit(
        &self,
        req: &CreateOrganizationalUnitRequest,
    ) -> Result<OrganizationalUnit>;

    async fn update_organizational_unit(
        &self,
        id: &str,
        req: &UpdateOrganizationalUnitRequest,
    ) -> Result<OrganizationalUnit>;

    /// Deletion cascades through child units and usually runs as a task.
    async fn delete_organizational_unit(&self, id: &str) -> Result<Submission<()>>;
}

#[async_trait]
pub trait PolicyStore: Send + Sync {
    async fn list_policies(&self, params: &ListParams) -> Result<PaginatedResponse<Policy>>;

    async fn get_policy(&self, id: &str) -> Result<Policy>;

    async fn create_policy(&self, req: &PolicyRequest) -> Result<Policy>;

    async fn update_policy(&self, id: &str, req: &PolicyRequest) -> Result<Policy>;

    async fn delete_policy(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait PolicyAssignmentStore: Send + Sync {
    async fn get_policy_assignment(
        &self,
        policy_id: &str,
        entity_id: &str,
    ) -> Result<PolicyAssignment>;

    async fn assign_policy(
        &self,
        policy_id: &str,
        req: &AssignPolicyRequest,
    ) -> Result<Submission<PolicyAssignment>>;

    async fn unassign_policy(&self, policy_id: &str, entity_id: &str) -> Result<Submission<()>>;
}

#[async_trait]
pub trait AwsConnectionStore: Send + Sync {
    async fn list_aws_connections(
        &self,
        params: &ListParams,
    ) -> Result<PaginatedResponse<AwsConnection>>;

    async fn get_aws_connection(&self, id: &str) -> Result<AwsConnection>;

    /// Creation validates the role by assuming it, which may run as a task.
    async fn create_aws_connection(
        &self,
        req: &AwsConnectionRequest,
    ) -> Result<Submission<AwsConnection>>;

    async fn update_aws_connection(
        &self,
        id: &str,
        req: &AwsConnectionRequest,
    ) -> Result<Submission<AwsConnection>>;

    async fn delete_aws_connection(&self, id: &str) -> Result<Submission<()>>;
}

/// Read-only inventory discovered through an AWS connection.
#[async_trait]
pub trait InventoryReader: Send + Sync {
    async fn list_s3_buckets(
        &self,
        connection_id: &str,
        params: &ListParams,
    ) -> Result<PaginatedResponse<S3Bucket>>;

    async fn get_s3_bucket(&self, connection_id: &str, name: &str) -> Result<S3Bucket>;

    async fn list_dynamodb_tables(
        &self,
        connection_id: &str,
        params: &ListParams,
    ) -> Result<PaginatedResponse<DynamoDbTable>>;

    async fn get_dynamodb_table(&self, connection_id: &str, name: &str) -> Result<DynamoDbTable>;
}

#[async_trait]
pub trait ReportConfigurationStore: Send + Sync {
    async fn get_report_configuration(&self, id: &str) -> Result<ReportConfiguration>;

    async fn create_report_configuration(
        &self,
        req: &ReportConfigurationRequest,
    ) -> Result<ReportConfiguration>;

    async fn update_report_configuration(
        &self,
        id: &str,
        req: &ReportConfigurationRequest,
    ) -> Result<ReportConfiguration>;

    async fn delete_report_configuration(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait WalletStore: Send + Sync {
    async fn get_wallet(&self, id: &str) -> Result<Wallet>;

    async fn create_wallet(&self, req: &WalletRequest) -> Result<Wallet>;

    /// Only the name can change; the KMS key is fixed at creation.
    async fn update_wallet(&self, id: &str, req: &WalletRequest) -> Result<Wallet>;

    async fn delete_wallet(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait CallbackStore: Send + Sync {
    async fn get_callback(&self, id: &str) -> Result<Callback>;

    async fn create_callback(&self, req: &CallbackRequest) -> Result<Callback>;

    async fn delete_callback(&self, id: &str) -> Result<()>;
}

/// Every capability at once, for callers that hold a single client.
pub trait ControlPlaneApi:
    TaskReader
    + OrganizationalUnitStore
    + PolicyStore
    + PolicyAssignmentStore
    + AwsConnectionStore
    + InventoryReader
    + ReportConfigurationStore
    + WalletStore
    + CallbackStore
{
}

impl<T> ControlPlaneApi for T where
    T: TaskReader
        + OrganizationalUnitStore
        + PolicyStore
        + PolicyAssignmentStore
        + AwsConnectionStore
        + InventoryReader
        + ReportConfigurationStore
        + WalletStore
        + CallbackStore
{
}
