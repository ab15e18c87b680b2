//! 备份策略管理服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::{ServiceContext, found, require_found, unless_gone};
use crate::types::{ListParams, PaginatedResponse, Policy, PolicyRequest};
use crate::validation::{require_non_empty, validate_retention_days};

const KIND: &str = "policy";

/// 备份策略管理服务
pub struct PolicyService {
    ctx: Arc<ServiceContext>,
}

impl PolicyService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    fn validate(request: &PolicyRequest) -> CoreResult<()> {
        require_non_empty("name", &request.name)?;
        require_non_empty("schedule", &request.schedule)?;
        validate_retention_days(request.retention_days)
    }

    pub async fn create(&self, request: PolicyRequest) -> CoreResult<Policy> {
        Self::validate(&request)?;
        let policy = self.ctx.policies.create_policy(&request).await?;
        log::info!("Created policy {} ({})", policy.id, policy.name);
        Ok(policy)
    }

    pub async fn read(&self, id: &str) -> CoreResult<Option<Policy>> {
        found(self.ctx.policies.get_policy(id).await, KIND, id)
    }

    pub async fn update(&self, id: &str, request: PolicyRequest) -> CoreResult<Policy> {
        Self::validate(&request)?;
        let policy = self.ctx.policies.update_policy(id, &request).await?;
        log::info!("Updated policy {id}");
        Ok(policy)
    }

    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        if unless_gone(self.ctx.policies.delete_policy(id).await, KIND, id)?.is_some() {
            log::info!("Deleted policy {id}");
        }
        Ok(())
    }

    pub async fn import(&self, id: &str) -> CoreResult<Policy> {
        let policy = self.read(id).await?;
        require_found(policy, KIND, id)
    }

    pub async fn list(&self, params: &ListParams) -> CoreResult<PaginatedResponse<Policy>> {
        Ok(self.ctx.policies.list_policies(params).await?)
    }
}

#[cfg(test)]
mod tests {
    use dataprotect_provider::ApiError;

    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{create_test_context, test_policy_request};

    #[tokio::test]
    async fn create_read_update_delete() {
        let (ctx, mock) = create_test_context();
        let svc = PolicyService::new(ctx);

        let policy = svc.create(test_policy_request()).await.unwrap();
        assert_eq!(policy.retention_days, 30);

        let mut change = test_policy_request();
        change.retention_days = 90;
        change.enabled = false;
        let updated = svc.update(&policy.id, change).await.unwrap();
        assert_eq!(updated.retention_days, 90);
        assert!(!updated.enabled);

        assert_eq!(svc.read(&policy.id).await.unwrap(), Some(updated));

        svc.delete(&policy.id).await.unwrap();
        assert!(mock.policies.read().await.is_empty());
        assert_eq!(svc.read(&policy.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn zero_retention_rejected() {
        let (ctx, mock) = create_test_context();
        let svc = PolicyService::new(ctx);
        let mut request = test_policy_request();
        request.retention_days = 0;

        let err = svc.create(request).await.unwrap_err();

        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "retention_days"));
        assert!(mock.policies.read().await.is_empty());
    }

    #[tokio::test]
    async fn blank_schedule_rejected_on_update() {
        let (ctx, _) = create_test_context();
        let svc = PolicyService::new(ctx);
        let policy = svc.create(test_policy_request()).await.unwrap();
        let mut request = test_policy_request();
        request.schedule = String::new();

        let err = svc.update(&policy.id, request).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "schedule"));
    }

    #[tokio::test]
    async fn delete_missing_is_success() {
        let (ctx, _) = create_test_context();
        PolicyService::new(ctx).delete("pol-gone").await.unwrap();
    }

    #[tokio::test]
    async fn conflict_surfaces_as_diagnostic() {
        let (ctx, mock) = create_test_context();
        let svc = PolicyService::new(ctx);
        mock.fail_next(ApiError::Conflict {
            resource: "policy".to_string(),
            raw_message: Some("name already used".to_string()),
        })
        .await;

        let err = svc.create(test_policy_request()).await.unwrap_err();
        let d = err.to_diagnostic();

        assert!(err.is_expected());
        assert_eq!(d.detail, "Conflict on policy: name already used");
    }
}
