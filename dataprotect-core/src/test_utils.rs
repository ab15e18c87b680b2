//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use dataprotect_provider::{
    ApiError, AssignPolicyRequest, AwsConnection, AwsConnectionRequest, AwsConnectionStore,
    Callback, CallbackRequest, CallbackStore, ConnectionStatus, CreateOrganizationalUnitRequest,
    DynamoDbTable, InventoryReader, ListParams, OrganizationalUnit, OrganizationalUnitStore,
    PaginatedResponse, Policy, PolicyAssignment, PolicyAssignmentStore, PolicyRequest,
    PolicyStore, ReportConfiguration, ReportConfigurationRequest, ReportConfigurationStore,
    Result, S3Bucket, Submission, Task, TaskHandle, TaskReader, TaskStatus,
    UpdateOrganizationalUnitRequest, Wallet, WalletRequest, WalletStore,
};
use tokio::sync::RwLock;

use crate::services::ServiceContext;

fn not_found(resource: &str, id: &str) -> ApiError {
    ApiError::NotFound {
        resource: resource.to_string(),
        id: id.to_string(),
        raw_message: None,
    }
}

fn paginate<T: Clone>(mut items: Vec<T>, params: &ListParams) -> PaginatedResponse<T> {
    let params = params.validated();
    let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let start = ((params.page - 1) * params.page_size) as usize;
    let page: Vec<T> = if start >= items.len() {
        Vec::new()
    } else {
        items
            .drain(start..)
            .take(params.page_size as usize)
            .collect()
    };
    PaginatedResponse::new(page, params.page, params.page_size, total)
}

// ===== MockControlPlane =====

/// In-memory control plane implementing every capability trait.
///
/// Mutations apply to the maps immediately. When [`defer_with`](Self::defer_with)
/// is set, calls that may run asynchronously answer with a task handle whose
/// statuses follow the given script.
pub struct MockControlPlane {
    pub organizational_units: RwLock<HashMap<String, OrganizationalUnit>>,
    pub policies: RwLock<HashMap<String, Policy>>,
    pub assignments: RwLock<HashMap<(String, String), PolicyAssignment>>,
    pub aws_connections: RwLock<HashMap<String, AwsConnection>>,
    pub s3_buckets: RwLock<Vec<S3Bucket>>,
    pub dynamodb_tables: RwLock<Vec<DynamoDbTable>>,
    pub report_configurations: RwLock<HashMap<String, ReportConfiguration>>,
    pub wallets: RwLock<HashMap<String, Wallet>>,
    pub callbacks: RwLock<HashMap<String, Callback>>,
    tasks: RwLock<HashMap<String, VecDeque<Task>>>,
    task_reads: RwLock<Vec<String>>,
    /// 如果 Some，可异步执行的接口返回 202，任务按此脚本推进
    deferred_script: RwLock<Option<Vec<TaskStatus>>>,
    /// 如果 Some，下一次调用返回此错误
    next_error: RwLock<Option<ApiError>>,
    /// Whether deferred creations report the new object's id.
    report_resource_id: RwLock<bool>,
    next_id: AtomicU32,
}

impl MockControlPlane {
    pub fn new() -> Self {
        Self {
            organizational_units: RwLock::new(HashMap::new()),
            policies: RwLock::new(HashMap::new()),
            assignments: RwLock::new(HashMap::new()),
            aws_connections: RwLock::new(HashMap::new()),
            s3_buckets: RwLock::new(Vec::new()),
            dynamodb_tables: RwLock::new(Vec::new()),
            report_configurations: RwLock::new(HashMap::new()),
            wallets: RwLock::new(HashMap::new()),
            callbacks: RwLock::new(HashMap::new()),
            tasks: RwLock::new(HashMap::new()),
            task_reads: RwLock::new(Vec::new()),
            deferred_script: RwLock::new(None),
            next_error: RwLock::new(None),
            report_resource_id: RwLock::new(true),
            next_id: AtomicU32::new(1),
        }
    }

    /// Script a task; the last status repeats once the script is exhausted.
    pub async fn script_task(&self, task_id: &str, statuses: &[TaskStatus]) {
        let script = statuses
            .iter()
            .map(|status| Task {
                id: task_id.to_string(),
                status: *status,
                reason: None,
                updated_at: None,
            })
            .collect();
        self.tasks.write().await.insert(task_id.to_string(), script);
    }

    pub async fn script_task_failure(&self, task_id: &str, reason: &str) {
        let task = Task {
            id: task_id.to_string(),
            status: TaskStatus::Failed,
            reason: Some(reason.to_string()),
            updated_at: None,
        };
        self.tasks
            .write()
            .await
            .insert(task_id.to_string(), VecDeque::from([task]));
    }

    /// Make deferrable calls answer 202 with tasks following `statuses`.
    pub async fn defer_with(&self, statuses: &[TaskStatus]) {
        *self.deferred_script.write().await = Some(statuses.to_vec());
    }

    /// Deferred creations omit `resource_id` from the task handle.
    pub async fn hide_resource_ids(&self) {
        *self.report_resource_id.write().await = false;
    }

    /// The next call of any method fails with `err`.
    pub async fn fail_next(&self, err: ApiError) {
        *self.next_error.write().await = Some(err);
    }

    /// Task ids in the order they were read.
    pub async fn task_reads(&self) -> Vec<String> {
        self.task_reads.read().await.clone()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn check(&self) -> Result<()> {
        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Open a task when deferral is configured.
    async fn defer(&self, resource_id: Option<&str>) -> Option<TaskHandle> {
        let script = self.deferred_script.read().await.clone()?;
        let task_id = self.next_id("task");
        self.script_task(&task_id, &script).await;

        let mut handle = TaskHandle::new(task_id);
        if *self.report_resource_id.read().await {
            if let Some(id) = resource_id {
                handle = handle.with_resource_id(id);
            }
        }
        Some(handle)
    }

    async fn submission<T>(&self, resource_id: Option<&str>, value: T) -> Submission<T> {
        match self.defer(resource_id).await {
            Some(handle) => Submission::Deferred(handle),
            None => Submission::Immediate(value),
        }
    }
}

#[async_trait]
impl TaskReader for MockControlPlane {
    async fn read_task(&self, task_id: &str) -> Result<Task> {
        self.task_reads.write().await.push(task_id.to_string());
        self.check().await?;

        let mut tasks = self.tasks.write().await;
        let script = tasks
            .get_mut(task_id)
            .ok_or_else(|| not_found("task", task_id))?;
        let task = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        task.ok_or_else(|| not_found("task", task_id))
    }
}

#[async_trait]
impl OrganizationalUnitStore for MockControlPlane {
    async fn list_organizational_units(
        &self,
        params: &ListParams,
    ) -> Result<PaginatedResponse<OrganizationalUnit>> {
        self.check().await?;
        let mut items: Vec<_> = self
            .organizational_units
            .read()
            .await
            .values()
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(paginate(items, params))
    }

    async fn get_organizational_unit(&self, id: &str) -> Result<OrganizationalUnit> {
        self.check().await?;
        self.organizational_units
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("organizational unit", id))
    }

    async fn create_organizational_unit(
        &self,
        req: &CreateOrganizationalUnitRequest,
    ) -> Result<OrganizationalUnit> {
        self.check().await?;
        let ou = OrganizationalUnit {
            id: self.next_id("ou"),
            name: req.name.clone(),
            parent_id: req.parent_id.clone(),
            external_id: req.external_id.clone(),
            created_at: None,
        };
        self.organizational_units
            .write()
            .await
            .insert(ou.id.clone(), ou.clone());
        Ok(ou)
    }

    async fn update_organizational_unit(
        &self,
        id: &str,
        req: &UpdateOrganizationalUnitRequest,
    ) -> Result<OrganizationalUnit> {
        self.check().await?;
        let mut units = self.organizational_units.write().await;
        let ou = units
            .get_mut(id)
            .ok_or_else(|| not_found("organizational unit", id))?;
        if let Some(name) = &req.name {
            ou.name.clone_from(name);
        }
        if req.parent_id.is_some() {
            ou.parent_id.clone_from(&req.parent_id);
        }
        if req.external_id.is_some() {
            ou.external_id.clone_from(&req.external_id);
        }
        Ok(ou.clone())
    }

    async fn delete_organizational_unit(&self, id: &str) -> Result<Submission<()>> {
        self.check().await?;
        self.organizational_units
            .write()
            .await
            .remove(id)
            .ok_or_else(|| not_found("organizational unit", id))?;
        Ok(self.submission(None, ()).await)
    }
}

#[async_trait]
impl PolicyStore for MockControlPlane {
    async fn list_policies(&self, params: &ListParams) -> Result<PaginatedResponse<Policy>> {
        self.check().await?;
        let mut items: Vec<_> = self.policies.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(paginate(items, params))
    }

    async fn get_policy(&self, id: &str) -> Result<Policy> {
        self.check().await?;
        self.policies
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("policy", id))
    }

    async fn create_policy(&self, req: &PolicyRequest) -> Result<Policy> {
        self.check().await?;
        let policy = Policy {
            id: self.next_id("pol"),
            name: req.name.clone(),
            description: req.description.clone(),
            schedule: req.schedule.clone(),
            retention_days: req.retention_days,
            enabled: req.enabled,
            created_at: None,
        };
        self.policies
            .write()
            .await
            .insert(policy.id.clone(), policy.clone());
        Ok(policy)
    }

    async fn update_policy(&self, id: &str, req: &PolicyRequest) -> Result<Policy> {
        self.check().await?;
        let mut policies = self.policies.write().await;
        let policy = policies.get_mut(id).ok_or_else(|| not_found("policy", id))?;
        policy.name.clone_from(&req.name);
        policy.description.clone_from(&req.description);
        policy.schedule.clone_from(&req.schedule);
        policy.retention_days = req.retention_days;
        policy.enabled = req.enabled;
        Ok(policy.clone())
    }

    async fn delete_policy(&self, id: &str) -> Result<()> {
        self.check().await?;
        self.policies
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("policy", id))
    }
}

#[async_trait]
impl PolicyAssignmentStore for MockControlPlane {
    async fn get_policy_assignment(
        &self,
        policy_id: &str,
        entity_id: &str,
    ) -> Result<PolicyAssignment> {
        self.check().await?;
        self.assignments
            .read()
            .await
            .get(&(policy_id.to_string(), entity_id.to_string()))
            .cloned()
            .ok_or_else(|| not_found("policy assignment", &format!("{policy_id}/{entity_id}")))
    }

    async fn assign_policy(
        &self,
        policy_id: &str,
        req: &AssignPolicyRequest,
    ) -> Result<Submission<PolicyAssignment>> {
        self.check().await?;
        if !self.policies.read().await.contains_key(policy_id) {
            return Err(not_found("policy", policy_id));
        }
        let assignment = PolicyAssignment {
            policy_id: policy_id.to_string(),
            entity_id: req.entity_id.clone(),
            entity_type: req.entity_type,
            assigned_at: None,
        };
        self.assignments.write().await.insert(
            (policy_id.to_string(), req.entity_id.clone()),
            assignment.clone(),
        );
        Ok(self.submission(None, assignment).await)
    }

    async fn unassign_policy(&self, policy_id: &str, entity_id: &str) -> Result<Submission<()>> {
        self.check().await?;
        self.assignments
            .write()
            .await
            .remove(&(policy_id.to_string(), entity_id.to_string()))
            .ok_or_else(|| not_found("policy assignment", &format!("{policy_id}/{entity_id}")))?;
        Ok(self.submission(None, ()).await)
    }
}

#[async_trait]
impl AwsConnectionStore for MockControlPlane {
    async fn list_aws_connections(
        &self,
        params: &ListParams,
    ) -> Result<PaginatedResponse<AwsConnection>> {
        self.check().await?;
        let mut items: Vec<_> = self.aws_connections.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(paginate(items, params))
    }

    async fn get_aws_connection(&self, id: &str) -> Result<AwsConnection> {
        self.check().await?;
        self.aws_connections
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("aws connection", id))
    }

    async fn create_aws_connection(
        &self,
        req: &AwsConnectionRequest,
    ) -> Result<Submission<AwsConnection>> {
        self.check().await?;
        let connection = AwsConnection {
            id: self.next_id("conn"),
            name: req.name.clone(),
            account_id: req.account_id.clone(),
            role_arn: req.role_arn.clone(),
            external_id: req.external_id.clone(),
            regions: req.regions.clone(),
            status: Some(ConnectionStatus::Connected),
        };
        self.aws_connections
            .write()
            .await
            .insert(connection.id.clone(), connection.clone());
        let id = connection.id.clone();
        Ok(self.submission(Some(&id), connection).await)
    }

    async fn update_aws_connection(
        &self,
        id: &str,
        req: &AwsConnectionRequest,
    ) -> Result<Submission<AwsConnection>> {
        self.check().await?;
        let updated = {
            let mut connections = self.aws_connections.write().await;
            let connection = connections
                .get_mut(id)
                .ok_or_else(|| not_found("aws connection", id))?;
            connection.name.clone_from(&req.name);
            connection.role_arn.clone_from(&req.role_arn);
            connection.external_id.clone_from(&req.external_id);
            connection.regions.clone_from(&req.regions);
            connection.clone()
        };
        Ok(self.submission(Some(id), updated).await)
    }

    async fn delete_aws_connection(&self, id: &str) -> Result<Submission<()>> {
        self.check().await?;
        self.aws_connections
            .write()
            .await
            .remove(id)
            .ok_or_else(|| not_found("aws connection", id))?;
        Ok(self.submission(None, ()).await)
    }
}

#[async_trait]
impl InventoryReader for MockControlPlane {
    async fn list_s3_buckets(
        &self,
        connection_id: &str,
        params: &ListParams,
    ) -> Result<PaginatedResponse<S3Bucket>> {
        self.check().await?;
        if !self.aws_connections.read().await.contains_key(connection_id) {
            return Err(not_found("aws connection", connection_id));
        }
        let items: Vec<_> = self
            .s3_buckets
            .read()
            .await
            .iter()
            .filter(|b| b.connection_id == connection_id)
            .cloned()
            .collect();
        Ok(paginate(items, params))
    }

    async fn get_s3_bucket(&self, connection_id: &str, name: &str) -> Result<S3Bucket> {
        self.check().await?;
        self.s3_buckets
            .read()
            .await
            .iter()
            .find(|b| b.connection_id == connection_id && b.name == name)
            .cloned()
            .ok_or_else(|| not_found("s3 bucket", name))
    }

    async fn list_dynamodb_tables(
        &self,
        connection_id: &str,
        params: &ListParams,
    ) -> Result<PaginatedResponse<DynamoDbTable>> {
        self.check().await?;
        if !self.aws_connections.read().await.contains_key(connection_id) {
            return Err(not_found("aws connection", connection_id));
        }
        let items: Vec<_> = self
            .dynamodb_tables
            .read()
            .await
            .iter()
            .filter(|t| t.connection_id == connection_id)
            .cloned()
            .collect();
        Ok(paginate(items, params))
    }

    async fn get_dynamodb_table(&self, connection_id: &str, name: &str) -> Result<DynamoDbTable> {
        self.check().await?;
        self.dynamodb_tables
            .read()
            .await
            .iter()
            .find(|t| t.connection_id == connection_id && t.name == name)
            .cloned()
            .ok_or_else(|| not_found("dynamodb table", name))
    }
}

#[async_trait]
impl ReportConfigurationStore for MockControlPlane {
    async fn get_report_configuration(&self, id: &str) -> Result<ReportConfiguration> {
        self.check().await?;
        self.report_configurations
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("report configuration", id))
    }

    async fn create_report_configuration(
        &self,
        req: &ReportConfigurationRequest,
    ) -> Result<ReportConfiguration> {
        self.check().await?;
        let report = ReportConfiguration {
            id: self.next_id("rpt"),
            name: req.name.clone(),
            report_type: req.report_type,
            schedule: req.schedule.clone(),
            recipients: req.recipients.clone(),
            enabled: req.enabled,
        };
        self.report_configurations
            .write()
            .await
            .insert(report.id.clone(), report.clone());
        Ok(report)
    }

    async fn update_report_configuration(
        &self,
        id: &str,
        req: &ReportConfigurationRequest,
    ) -> Result<ReportConfiguration> {
        self.check().await?;
        let mut reports = self.report_configurations.write().await;
        let report = reports
            .get_mut(id)
            .ok_or_else(|| not_found("report configuration", id))?;
        report.name.clone_from(&req.name);
        report.report_type = req.report_type;
        report.schedule.clone_from(&req.schedule);
        report.recipients.clone_from(&req.recipients);
        report.enabled = req.enabled;
        Ok(report.clone())
    }

    async fn delete_report_configuration(&self, id: &str) -> Result<()> {
        self.check().await?;
        self.report_configurations
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("report configuration", id))
    }
}

#[async_trait]
impl WalletStore for MockControlPlane {
    async fn get_wallet(&self, id: &str) -> Result<Wallet> {
        self.check().await?;
        self.wallets
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("wallet", id))
    }

    async fn create_wallet(&self, req: &WalletRequest) -> Result<Wallet> {
        self.check().await?;
        let wallet = Wallet {
            id: self.next_id("wal"),
            name: req.name.clone(),
            kms_key_arn: req.kms_key_arn.clone(),
            created_at: None,
        };
        self.wallets
            .write()
            .await
            .insert(wallet.id.clone(), wallet.clone());
        Ok(wallet)
    }

    async fn update_wallet(&self, id: &str, req: &WalletRequest) -> Result<Wallet> {
        self.check().await?;
        let mut wallets = self.wallets.write().await;
        let wallet = wallets.get_mut(id).ok_or_else(|| not_found("wallet", id))?;
        wallet.name.clone_from(&req.name);
        Ok(wallet.clone())
    }

    async fn delete_wallet(&self, id: &str) -> Result<()> {
        self.check().await?;
        self.wallets
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("wallet", id))
    }
}

#[async_trait]
impl CallbackStore for MockControlPlane {
    async fn get_callback(&self, id: &str) -> Result<Callback> {
        self.check().await?;
        self.callbacks
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("callback", id))
    }

    async fn create_callback(&self, req: &CallbackRequest) -> Result<Callback> {
        self.check().await?;
        let callback = Callback {
            id: self.next_id("cb"),
            name: req.name.clone(),
            kind: req.kind,
            target_arn: req.target_arn.clone(),
            events: req.events.clone(),
        };
        self.callbacks
            .write()
            .await
            .insert(callback.id.clone(), callback.clone());
        Ok(callback)
    }

    async fn delete_callback(&self, id: &str) -> Result<()> {
        self.check().await?;
        self.callbacks
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("callback", id))
    }
}

// ===== 测试工厂 =====

/// 创建使用 mock 控制面的服务上下文
pub fn create_test_context() -> (Arc<ServiceContext>, Arc<MockControlPlane>) {
    let mock = Arc::new(MockControlPlane::new());
    let ctx = Arc::new(ServiceContext::new(mock.clone()));
    (ctx, mock)
}

pub fn test_policy_request() -> PolicyRequest {
    PolicyRequest {
        name: "daily-backup".to_string(),
        description: Some("nightly snapshots".to_string()),
        schedule: "0 3 * * *".to_string(),
        retention_days: 30,
        enabled: true,
    }
}

pub fn test_connection_request() -> AwsConnectionRequest {
    AwsConnectionRequest {
        name: "production".to_string(),
        account_id: "123456789012".to_string(),
        role_arn: "arn:aws:iam::123456789012:role/backup".to_string(),
        external_id: Some("ext-1".to_string()),
        regions: vec!["eu-west-1".to_string()],
    }
}

pub fn test_bucket(connection_id: &str, name: &str) -> S3Bucket {
    S3Bucket {
        name: name.to_string(),
        connection_id: connection_id.to_string(),
        region: "eu-west-1".to_string(),
        arn: format!("arn:aws:s3:::{name}"),
        protected: false,
    }
}

pub fn test_table(connection_id: &str, name: &str) -> DynamoDbTable {
    DynamoDbTable {
        name: name.to_string(),
        connection_id: connection_id.to_string(),
        region: "eu-west-1".to_string(),
        arn: format!("arn:aws:dynamodb:eu-west-1:123456789012:table/{name}"),
        protected: true,
    }
}
