//! 资源生命周期服务层
//!
//! One service per resource kind. Services validate input, call the narrow
//! capability traits, resolve [`Submission`]s (polling deferred operations)
//! and translate "object is gone" answers into state removal.

mod aws_connection_service;
mod callback_service;
mod inventory_service;
mod organizational_unit_service;
mod policy_assignment_service;
mod policy_service;
mod report_configuration_service;
mod wallet_service;

pub use aws_connection_service::AwsConnectionService;
pub use callback_service::CallbackService;
pub use inventory_service::InventoryService;
pub use organizational_unit_service::OrganizationalUnitService;
pub use policy_assignment_service::PolicyAssignmentService;
pub use policy_service::PolicyService;
pub use report_configuration_service::ReportConfigurationService;
pub use wallet_service::WalletService;

use std::future::Future;
use std::sync::Arc;

use dataprotect_provider::{
    ApiError, AwsConnectionStore, CallbackStore, ControlPlaneApi, InventoryReader,
    OrganizationalUnitStore, PolicyAssignmentStore, PolicyStore, PollOptions,
    ReportConfigurationStore, Submission, TaskHandle, TaskReader, WalletStore, await_task,
};
use tokio_util::sync::CancellationToken;

use crate::diagnostics::Diagnostic;
use crate::error::{CoreError, CoreResult};

/// Poll profiles used by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Quick operations: policy assignment, AWS connection changes.
    pub fast: PollOptions,
    /// Slow operations: organizational-unit deletion.
    pub slow: PollOptions,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            fast: PollOptions::FAST,
            slow: PollOptions::SLOW,
        }
    }
}

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入 API 客户端（或测试替身）。
pub struct ServiceContext {
    pub tasks: Arc<dyn TaskReader>,
    pub organizational_units: Arc<dyn OrganizationalUnitStore>,
    pub policies: Arc<dyn PolicyStore>,
    pub policy_assignments: Arc<dyn PolicyAssignmentStore>,
    pub aws_connections: Arc<dyn AwsConnectionStore>,
    pub inventory: Arc<dyn InventoryReader>,
    pub report_configurations: Arc<dyn ReportConfigurationStore>,
    pub wallets: Arc<dyn WalletStore>,
    pub callbacks: Arc<dyn CallbackStore>,
    pub poll: PollSettings,
    cancel: CancellationToken,
}

impl ServiceContext {
    /// 创建服务上下文，所有能力由同一个客户端提供
    #[must_use]
    pub fn new<A>(api: Arc<A>) -> Self
    where
        A: ControlPlaneApi + 'static,
    {
        Self {
            tasks: api.clone(),
            organizational_units: api.clone(),
            policies: api.clone(),
            policy_assignments: api.clone(),
            aws_connections: api.clone(),
            inventory: api.clone(),
            report_configurations: api.clone(),
            wallets: api.clone(),
            callbacks: api,
            poll: PollSettings::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    /// Share a token that aborts every poll started through this context.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// 等待后台任务完成
    ///
    /// `context` becomes the diagnostic summary if the wait fails.
    pub async fn wait_for_task(
        &self,
        handle: &TaskHandle,
        options: PollOptions,
        context: &str,
    ) -> CoreResult<()> {
        log::info!("{context}: waiting for task {}", handle.task_id);

        await_task(self.tasks.as_ref(), &handle.task_id, options, &self.cancel)
            .await
            .map_err(|e| {
                let err = CoreError::task(context, e);
                if err.is_expected() {
                    log::warn!("{err}");
                } else {
                    log::error!("{err}");
                }
                err
            })
    }

    /// Resolve a submission exactly once.
    ///
    /// `Immediate` values are returned as is. For `Deferred` handles the task
    /// is awaited with `options`, then `read_back` fetches the final object.
    pub async fn complete_submission<T, F, Fut>(
        &self,
        submission: Submission<T>,
        options: PollOptions,
        context: &str,
        read_back: F,
    ) -> CoreResult<T>
    where
        F: FnOnce(TaskHandle) -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        match submission {
            Submission::Immediate(value) => Ok(value),
            Submission::Deferred(handle) => {
                self.wait_for_task(&handle, options, context).await?;
                read_back(handle).await
            }
        }
    }
}

/// Read result for a managed resource: a 404 means it was deleted outside
/// of this provider and must be dropped from state.
pub(crate) fn found<T>(result: Result<T, ApiError>, kind: &str, id: &str) -> CoreResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            log::warn!("{}", removed_from_state(kind, id));
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Warning shown when a managed object disappeared outside of this provider.
pub(crate) fn removed_from_state(kind: &str, id: &str) -> Diagnostic {
    Diagnostic::warning(
        format!("{kind} {id} removed from state"),
        format!("The {kind} no longer exists on the control plane; it will be recreated on the next apply."),
    )
}

/// Delete result: a 404 means the object is already gone.
pub(crate) fn unless_gone<T>(
    result: Result<T, ApiError>,
    kind: &str,
    id: &str,
) -> CoreResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            log::info!("{kind} {id} already deleted");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Turn a missing object into an error where existence is required.
pub(crate) fn require_found<T>(value: Option<T>, kind: &str, id: &str) -> CoreResult<T> {
    value.ok_or_else(|| CoreError::NotFound {
        kind: kind.to_string(),
        id: id.to_string(),
    })
}
