//! 组织单元管理服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::{ServiceContext, found, require_found, unless_gone};
use crate::types::{
    CreateOrganizationalUnitRequest, ListParams, OrganizationalUnit, PaginatedResponse,
    UpdateOrganizationalUnitRequest,
};
use crate::validation::require_non_empty;

const KIND: &str = "organizational unit";

/// 组织单元管理服务
pub struct OrganizationalUnitService {
    ctx: Arc<ServiceContext>,
}

impl OrganizationalUnitService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn create(
        &self,
        request: CreateOrganizationalUnitRequest,
    ) -> CoreResult<OrganizationalUnit> {
        require_non_empty("name", &request.name)?;
        if let Some(parent_id) = &request.parent_id {
            require_non_empty("parent_id", parent_id)?;
        }

        let ou = self
            .ctx
            .organizational_units
            .create_organizational_unit(&request)
            .await?;
        log::info!("Created organizational unit {} ({})", ou.id, ou.name);
        Ok(ou)
    }

    /// `None` when the unit no longer exists.
    pub async fn read(&self, id: &str) -> CoreResult<Option<OrganizationalUnit>> {
        found(
            self.ctx.organizational_units.get_organizational_unit(id).await,
            KIND,
            id,
        )
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateOrganizationalUnitRequest,
    ) -> CoreResult<OrganizationalUnit> {
        if let Some(name) = &request.name {
            require_non_empty("name", name)?;
        }

        // 无变更时不发 PATCH
        if request.is_empty() {
            let current = self.read(id).await?;
            return require_found(current, KIND, id);
        }

        let ou = self
            .ctx
            .organizational_units
            .update_organizational_unit(id, &request)
            .await?;
        log::info!("Updated organizational unit {id}");
        Ok(ou)
    }

    /// Deletion cascades on the backend and may take a long time; deferred
    /// deletes are polled with the slow profile.
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        let result = self
            .ctx
            .organizational_units
            .delete_organizational_unit(id)
            .await;
        let Some(submission) = unless_gone(result, KIND, id)? else {
            return Ok(());
        };

        let context = format!("Unable to poll task after deleting organizational unit {id}");
        self.ctx
            .complete_submission(submission, self.ctx.poll.slow, &context, |_| async {
                Ok(())
            })
            .await?;
        log::info!("Deleted organizational unit {id}");
        Ok(())
    }

    pub async fn import(&self, id: &str) -> CoreResult<OrganizationalUnit> {
        let ou = self.read(id).await?;
        require_found(ou, KIND, id)
    }

    pub async fn list(&self, params: &ListParams) -> CoreResult<PaginatedResponse<OrganizationalUnit>> {
        Ok(self
            .ctx
            .organizational_units
            .list_organizational_units(params)
            .await?)
    }
}
