//! 策略分配服务
//!
//! Assignments have no mutable attributes: any change to policy, entity or
//! entity type replaces the assignment. The backend may apply assignment and
//! removal asynchronously; both are polled with the fast profile.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::{ServiceContext, found, require_found, unless_gone};
use crate::types::{AssignPolicyRequest, AssignmentId, EntityType, PolicyAssignmentState};
use crate::validation::require_non_empty;

const KIND: &str = "policy assignment";

/// 策略分配服务
pub struct PolicyAssignmentService {
    ctx: Arc<ServiceContext>,
}

impl PolicyAssignmentService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 分配策略到实体
    pub async fn create(
        &self,
        policy_id: &str,
        entity_id: &str,
        entity_type: EntityType,
    ) -> CoreResult<PolicyAssignmentState> {
        require_non_empty("policy_id", policy_id)?;
        require_non_empty("entity_id", entity_id)?;

        let request = AssignPolicyRequest {
            entity_id: entity_id.to_string(),
            entity_type,
        };
        let submission = self
            .ctx
            .policy_assignments
            .assign_policy(policy_id, &request)
            .await?;

        let context =
            format!("Unable to poll task after assigning policy {policy_id} to entity {entity_id}");
        let assignment = self
            .ctx
            .complete_submission(submission, self.ctx.poll.fast, &context, |_| async {
                let assignment = self
                    .ctx
                    .policy_assignments
                    .get_policy_assignment(policy_id, entity_id)
                    .await;
                let assignment = found(assignment, KIND, &format!("{policy_id}/{entity_id}"))?;
                require_found(assignment, KIND, &format!("{policy_id}/{entity_id}"))
            })
            .await?;

        log::info!(
            "Assigned policy {policy_id} to {} {entity_id}",
            entity_type.as_str()
        );
        Ok(assignment.into())
    }

    /// 读取分配；`id` 为 `"{policy_id}/{entity_id}"`
    pub async fn read(&self, id: &str) -> CoreResult<Option<PolicyAssignmentState>> {
        let AssignmentId {
            policy_id,
            entity_id,
        } = id.parse()?;

        let assignment = self
            .ctx
            .policy_assignments
            .get_policy_assignment(&policy_id, &entity_id)
            .await;
        Ok(found(assignment, KIND, id)?.map(PolicyAssignmentState::from))
    }

    /// 取消分配
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        let AssignmentId {
            policy_id,
            entity_id,
        } = id.parse()?;

        let result = self
            .ctx
            .policy_assignments
            .unassign_policy(&policy_id, &entity_id)
            .await;
        let Some(submission) = unless_gone(result, KIND, id)? else {
            return Ok(());
        };

        let context = format!(
            "Unable to poll task after removing policy {policy_id} from entity {entity_id}"
        );
        self.ctx
            .complete_submission(submission, self.ctx.poll.fast, &context, |_| async {
                Ok(())
            })
            .await?;
        log::info!("Removed policy {policy_id} from entity {entity_id}");
        Ok(())
    }

    /// 导入已有分配
    pub async fn import(&self, id: &str) -> CoreResult<PolicyAssignmentState> {
        let state = self.read(id).await?;
        require_found(state, KIND, id)
    }
}
