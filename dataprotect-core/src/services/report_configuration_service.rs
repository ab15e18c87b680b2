//! 报表配置服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::{ServiceContext, found, require_found, unless_gone};
use crate::types::{ReportConfiguration, ReportConfigurationRequest};
use crate::validation::{require_non_empty, validate_recipients};

const KIND: &str = "report configuration";

/// 报表配置服务
pub struct ReportConfigurationService {
    ctx: Arc<ServiceContext>,
}

impl ReportConfigurationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    fn validate(request: &ReportConfigurationRequest) -> CoreResult<()> {
        require_non_empty("name", &request.name)?;
        require_non_empty("schedule", &request.schedule)?;
        validate_recipients(&request.recipients)
    }

    pub async fn create(
        &self,
        request: ReportConfigurationRequest,
    ) -> CoreResult<ReportConfiguration> {
        Self::validate(&request)?;
        let report = self
            .ctx
            .report_configurations
            .create_report_configuration(&request)
            .await?;
        log::info!("Created report configuration {} ({})", report.id, report.name);
        Ok(report)
    }

    pub async fn read(&self, id: &str) -> CoreResult<Option<ReportConfiguration>> {
        found(
            self.ctx
                .report_configurations
                .get_report_configuration(id)
                .await,
            KIND,
            id,
        )
    }

    pub async fn update(
        &self,
        id: &str,
        request: ReportConfigurationRequest,
    ) -> CoreResult<ReportConfiguration> {
        Self::validate(&request)?;
        let report = self
            .ctx
            .report_configurations
            .update_report_configuration(id, &request)
            .await?;
        log::info!("Updated report configuration {id}");
        Ok(report)
    }

    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        let result = self
            .ctx
            .report_configurations
            .delete_report_configuration(id)
            .await;
        if unless_gone(result, KIND, id)?.is_some() {
            log::info!("Deleted report configuration {id}");
        }
        Ok(())
    }

    pub async fn import(&self, id: &str) -> CoreResult<ReportConfiguration> {
        let report = self.read(id).await?;
        require_found(report, KIND, id)
    }
}
