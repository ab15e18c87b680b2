//! AWS 连接管理服务
//!
//! Creating or updating a connection makes the backend assume the role, which
//! may run as a task. Deferred creations are read back through the id the
//! task handle reports.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, found, require_found, unless_gone};
use crate::types::{AwsConnection, AwsConnectionRequest, ListParams, PaginatedResponse};
use crate::validation::{require_non_empty, validate_account_id, validate_arn};

const KIND: &str = "aws connection";

/// AWS 连接管理服务
pub struct AwsConnectionService {
    ctx: Arc<ServiceContext>,
}

impl AwsConnectionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    fn validate(request: &AwsConnectionRequest) -> CoreResult<()> {
        require_non_empty("name", &request.name)?;
        validate_account_id(&request.account_id)?;
        validate_arn("role_arn", &request.role_arn)?;
        for region in &request.regions {
            require_non_empty("regions", region)?;
        }
        Ok(())
    }

    async fn read_back(&self, id: &str) -> CoreResult<AwsConnection> {
        let connection = found(self.ctx.aws_connections.get_aws_connection(id).await, KIND, id)?;
        require_found(connection, KIND, id)
    }

    pub async fn create(&self, request: AwsConnectionRequest) -> CoreResult<AwsConnection> {
        Self::validate(&request)?;

        let submission = self
            .ctx
            .aws_connections
            .create_aws_connection(&request)
            .await?;

        let context = format!(
            "Unable to poll task after creating AWS connection {}",
            request.name
        );
        let connection = self
            .ctx
            .complete_submission(submission, self.ctx.poll.fast, &context, |handle| async move {
                let id = handle.resource_id.ok_or_else(|| {
                    CoreError::IncompleteResponse(format!(
                        "task {} did not report the id of the new AWS connection",
                        handle.task_id
                    ))
                })?;
                self.read_back(&id).await
            })
            .await?;

        log::info!(
            "Created AWS connection {} for account {}",
            connection.id,
            connection.account_id
        );
        Ok(connection)
    }

    pub async fn read(&self, id: &str) -> CoreResult<Option<AwsConnection>> {
        found(self.ctx.aws_connections.get_aws_connection(id).await, KIND, id)
    }

    /// The account id cannot change in place.
    pub async fn update(&self, id: &str, request: AwsConnectionRequest) -> CoreResult<AwsConnection> {
        Self::validate(&request)?;

        let current = self.read_back(id).await?;
        if current.account_id != request.account_id {
            return Err(CoreError::Validation {
                field: "account_id".to_string(),
                detail: format!(
                    "cannot change from {} to {}; the connection must be replaced",
                    current.account_id, request.account_id
                ),
            });
        }

        let submission = self
            .ctx
            .aws_connections
            .update_aws_connection(id, &request)
            .await?;

        let context = format!("Unable to poll task after updating AWS connection {id}");
        let connection = self
            .ctx
            .complete_submission(submission, self.ctx.poll.fast, &context, |_| {
                self.read_back(id)
            })
            .await?;

        log::info!("Updated AWS connection {id}");
        Ok(connection)
    }

    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        let result = self.ctx.aws_connections.delete_aws_connection(id).await;
        let Some(submission) = unless_gone(result, KIND, id)? else {
            return Ok(());
        };

        let context = format!("Unable to poll task after deleting AWS connection {id}");
        self.ctx
            .complete_submission(submission, self.ctx.poll.fast, &context, |_| async {
                Ok(())
            })
            .await?;
        log::info!("Deleted AWS connection {id}");
        Ok(())
    }

    pub async fn import(&self, id: &str) -> CoreResult<AwsConnection> {
        let connection = self.read(id).await?;
        require_found(connection, KIND, id)
    }

    pub async fn list(&self, params: &ListParams) -> CoreResult<PaginatedResponse<AwsConnection>> {
        Ok(self.ctx.aws_connections.list_aws_connections(params).await?)
    }
}
