//! Capability trait implementations

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{
    AwsConnectionStore, CallbackStore, ErrorContext, InventoryReader, OrganizationalUnitStore,
    PolicyAssignmentStore, PolicyStore, ReportConfigurationStore, TaskReader, WalletStore,
};
use crate::types::{
    AssignPolicyRequest, AwsConnection, AwsConnectionRequest, Callback, CallbackRequest,
    CreateOrganizationalUnitRequest, DynamoDbTable, ListParams, OrganizationalUnit,
    PaginatedResponse, Policy, PolicyAssignment, PolicyRequest, ReportConfiguration,
    ReportConfigurationRequest, S3Bucket, Submission, Task, UpdateOrganizationalUnitRequest,
    Wallet, WalletRequest,
};

use super::{ControlPlaneClient, segment};

const TASK: &str = "task";
const ORGANIZATIONAL_UNIT: &str = "organizational unit";
const POLICY: &str = "policy";
const POLICY_ASSIGNMENT: &str = "policy assignment";
const AWS_CONNECTION: &str = "aws connection";
const S3_BUCKET: &str = "s3 bucket";
const DYNAMODB_TABLE: &str = "dynamodb table";
const REPORT_CONFIGURATION: &str = "report configuration";
const WALLET: &str = "wallet";
const CALLBACK: &str = "callback";

#[async_trait]
impl TaskReader for ControlPlaneClient {
    async fn read_task(&self, task_id: &str) -> Result<Task> {
        self.get_once(
            &format!("/tasks/{}", segment(task_id)),
            ErrorContext::new(TASK, task_id),
        )
        .await
    }
}

#[async_trait]
impl OrganizationalUnitStore for ControlPlaneClient {
    async fn list_organizational_units(
        &self,
        params: &ListParams,
    ) -> Result<PaginatedResponse<OrganizationalUnit>> {
        self.get_paginated(
            "/organizational-units",
            params,
            ErrorContext::for_kind(ORGANIZATIONAL_UNIT),
        )
        .await
    }

    async fn get_organizational_unit(&self, id: &str) -> Result<OrganizationalUnit> {
        self.get(
            &format!("/organizational-units/{}", segment(id)),
            ErrorContext::new(ORGANIZATIONAL_UNIT, id),
        )
        .await
    }

    async fn create_organizational_unit(
        &self,
        req: &CreateOrganizationalUnitRequest,
    ) -> Result<OrganizationalUnit> {
        let submission = self
            .post(
                "/organizational-units",
                req,
                ErrorContext::for_kind(ORGANIZATIONAL_UNIT),
            )
            .await?;
        self.expect_immediate(submission)
    }

    async fn update_organizational_unit(
        &self,
        id: &str,
        req: &UpdateOrganizationalUnitRequest,
    ) -> Result<OrganizationalUnit> {
        let submission = self
            .patch(
                &format!("/organizational-units/{}", segment(id)),
                req,
                ErrorContext::new(ORGANIZATIONAL_UNIT, id),
            )
            .await?;
        self.expect_immediate(submission)
    }

    async fn delete_organizational_unit(&self, id: &str) -> Result<Submission<()>> {
        self.delete(
            &format!("/organizational-units/{}", segment(id)),
            ErrorContext::new(ORGANIZATIONAL_UNIT, id),
        )
        .await
    }
}

#[async_trait]
impl PolicyStore for ControlPlaneClient {
    async fn list_policies(&self, params: &ListParams) -> Result<PaginatedResponse<Policy>> {
        self.get_paginated("/policies", params, ErrorContext::for_kind(POLICY))
            .await
    }

    async fn get_policy(&self, id: &str) -> Result<Policy> {
        self.get(
            &format!("/policies/{}", segment(id)),
            ErrorContext::new(POLICY, id),
        )
        .await
    }

    async fn create_policy(&self, req: &PolicyRequest) -> Result<Policy> {
        let submission = self
            .post("/policies", req, ErrorContext::for_kind(POLICY))
            .await?;
        self.expect_immediate(submission)
    }

    async fn update_policy(&self, id: &str, req: &PolicyRequest) -> Result<Policy> {
        let submission = self
            .patch(
                &format!("/policies/{}", segment(id)),
                req,
                ErrorContext::new(POLICY, id),
            )
            .await?;
        self.expect_immediate(submission)
    }

    async fn delete_policy(&self, id: &str) -> Result<()> {
        let submission = self
            .delete(
                &format!("/policies/{}", segment(id)),
                ErrorContext::new(POLICY, id),
            )
            .await?;
        self.expect_immediate(submission)
    }
}

#[async_trait]
impl PolicyAssignmentStore for ControlPlaneClient {
    async fn get_policy_assignment(
        &self,
        policy_id: &str,
        entity_id: &str,
    ) -> Result<PolicyAssignment> {
        self.get(
            &format!(
                "/policies/{}/assignments/{}",
                segment(policy_id),
                segment(entity_id)
            ),
            ErrorContext::new(POLICY_ASSIGNMENT, format!("{policy_id}/{entity_id}")),
        )
        .await
    }

    async fn assign_policy(
        &self,
        policy_id: &str,
        req: &AssignPolicyRequest,
    ) -> Result<Submission<PolicyAssignment>> {
        self.post(
            &format!("/policies/{}/assignments", segment(policy_id)),
            req,
            ErrorContext::new(POLICY, policy_id),
        )
        .await
    }

    async fn unassign_policy(&self, policy_id: &str, entity_id: &str) -> Result<Submission<()>> {
        self.delete(
            &format!(
                "/policies/{}/assignments/{}",
                segment(policy_id),
                segment(entity_id)
            ),
            ErrorContext::new(POLICY_ASSIGNMENT, format!("{policy_id}/{entity_id}")),
        )
        .await
    }
}

#[async_trait]
impl AwsConnectionStore for ControlPlaneClient {
    async fn list_aws_connections(
        &self,
        params: &ListParams,
    ) -> Result<PaginatedResponse<AwsConnection>> {
        self.get_paginated(
            "/connections/aws",
            params,
            ErrorContext::for_kind(AWS_CONNECTION),
        )
        .await
    }

    async fn get_aws_connection(&self, id: &str) -> Result<AwsConnection> {
        self.get(
            &format!("/connections/aws/{}", segment(id)),
            ErrorContext::new(AWS_CONNECTION, id),
        )
        .await
    }

    async fn create_aws_connection(
        &self,
        req: &AwsConnectionRequest,
    ) -> Result<Submission<AwsConnection>> {
        self.post(
            "/connections/aws",
            req,
            ErrorContext::for_kind(AWS_CONNECTION),
        )
        .await
    }

    async fn update_aws_connection(
        &self,
        id: &str,
        req: &AwsConnectionRequest,
    ) -> Result<Submission<AwsConnection>> {
        self.patch(
            &format!("/connections/aws/{}", segment(id)),
            req,
            ErrorContext::new(AWS_CONNECTION, id),
        )
        .await
    }

    async fn delete_aws_connection(&self, id: &str) -> Result<Submission<()>> {
        self.delete(
            &format!("/connections/aws/{}", segment(id)),
            ErrorContext::new(AWS_CONNECTION, id),
        )
        .await
    }
}

#[async_trait]
impl InventoryReader for ControlPlaneClient {
    async fn list_s3_buckets(
        &self,
        connection_id: &str,
        params: &ListParams,
    ) -> Result<PaginatedResponse<S3Bucket>> {
        self.get_paginated(
            &format!("/connections/aws/{}/s3-buckets", segment(connection_id)),
            params,
            ErrorContext::new(AWS_CONNECTION, connection_id),
        )
        .await
    }

    async fn get_s3_bucket(&self, connection_id: &str, name: &str) -> Result<S3Bucket> {
        self.get(
            &format!(
                "/connections/aws/{}/s3-buckets/{}",
                segment(connection_id),
                segment(name)
            ),
            ErrorContext::new(S3_BUCKET, name),
        )
        .await
    }

    async fn list_dynamodb_tables(
        &self,
        connection_id: &str,
        params: &ListParams,
    ) -> Result<PaginatedResponse<DynamoDbTable>> {
        self.get_paginated(
            &format!(
                "/connections/aws/{}/dynamodb-tables",
                segment(connection_id)
            ),
            params,
            ErrorContext::new(AWS_CONNECTION, connection_id),
        )
        .await
    }

    async fn get_dynamodb_table(&self, connection_id: &str, name: &str) -> Result<DynamoDbTable> {
        self.get(
            &format!(
                "/connections/aws/{}/dynamodb-tables/{}",
                segment(connection_id),
                segment(name)
            ),
            ErrorContext::new(DYNAMODB_TABLE, name),
        )
        .await
    }
}

#[async_trait]
impl ReportConfigurationStore for ControlPlaneClient {
    async fn get_report_configuration(&self, id: &str) -> Result<ReportConfiguration> {
        self.get(
            &format!("/report-configurations/{}", segment(id)),
            ErrorContext::new(REPORT_CONFIGURATION, id),
        )
        .await
    }

    async fn create_report_configuration(
        &self,
        req: &ReportConfigurationRequest,
    ) -> Result<ReportConfiguration> {
        let submission = self
            .post(
                "/report-configurations",
                req,
                ErrorContext::for_kind(REPORT_CONFIGURATION),
            )
            .await?;
        self.expect_immediate(submission)
    }

    async fn update_report_configuration(
        &self,
        id: &str,
        req: &ReportConfigurationRequest,
    ) -> Result<ReportConfiguration> {
        let submission = self
            .patch(
                &format!("/report-configurations/{}", segment(id)),
                req,
                ErrorContext::new(REPORT_CONFIGURATION, id),
            )
            .await?;
        self.expect_immediate(submission)
    }

    async fn delete_report_configuration(&self, id: &str) -> Result<()> {
        let submission = self
            .delete(
                &format!("/report-configurations/{}", segment(id)),
                ErrorContext::new(REPORT_CONFIGURATION, id),
            )
            .await?;
        self.expect_immediate(submission)
    }
}

#[async_trait]
impl WalletStore for ControlPlaneClient {
    async fn get_wallet(&self, id: &str) -> Result<Wallet> {
        self.get(
            &format!("/wallets/{}", segment(id)),
            ErrorContext::new(WALLET, id),
        )
        .await
    }

    async fn create_wallet(&self, req: &WalletRequest) -> Result<Wallet> {
        let submission = self
            .post("/wallets", req, ErrorContext::for_kind(WALLET))
            .await?;
        self.expect_immediate(submission)
    }

    async fn update_wallet(&self, id: &str, req: &WalletRequest) -> Result<Wallet> {
        let submission = self
            .patch(
                &format!("/wallets/{}", segment(id)),
                req,
                ErrorContext::new(WALLET, id),
            )
            .await?;
        self.expect_immediate(submission)
    }

    async fn delete_wallet(&self, id: &str) -> Result<()> {
        let submission = self
            .delete(
                &format!("/wallets/{}", segment(id)),
                ErrorContext::new(WALLET, id),
            )
            .await?;
        self.expect_immediate(submission)
    }
}

#[async_trait]
impl CallbackStore for ControlPlaneClient {
    async fn get_callback(&self, id: &str) -> Result<Callback> {
        self.get(
            &format!("/callbacks/{}", segment(id)),
            ErrorContext::new(CALLBACK, id),
        )
        .await
    }

    async fn create_callback(&self, req: &CallbackRequest) -> Result<Callback> {
        let submission = self
            .post("/callbacks", req, ErrorContext::for_kind(CALLBACK))
            .await?;
        self.expect_immediate(submission)
    }

    async fn delete_callback(&self, id: &str) -> Result<()> {
        let submission = self
            .delete(
                &format!("/callbacks/{}", segment(id)),
                ErrorContext::new(CALLBACK, id),
            )
            .await?;
        self.expect_immediate(submission)
    }
}
