//! S3 / DynamoDB 数据源
//!
//! Inventory is discovered by the backend through an AWS connection and is
//! read-only here. Unlike managed resources, a missing object is an error.

use std::sync::Arc;

use dataprotect_provider::ApiError;
use futures::{StreamExt, TryStreamExt};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{DynamoDbTable, ListParams, PaginatedResponse, S3Bucket};
use crate::validation::require_non_empty;

/// Page size used when collecting a full inventory.
const FULL_LIST_PAGE_SIZE: u32 = ListParams::MAX_PAGE_SIZE;
/// Pages requested at the same time when collecting a full inventory.
const MAX_CONCURRENT_PAGES: usize = 8;

/// S3 / DynamoDB 数据源服务
pub struct InventoryService {
    ctx: Arc<ServiceContext>,
}

impl InventoryService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn s3_bucket(&self, connection_id: &str, name: &str) -> CoreResult<S3Bucket> {
        require_non_empty("connection_id", connection_id)?;
        require_non_empty("name", name)?;
        self.ctx
            .inventory
            .get_s3_bucket(connection_id, name)
            .await
            .map_err(|e| missing_as_not_found(e, "s3 bucket", connection_id, name))
    }

    pub async fn list_s3_buckets(
        &self,
        connection_id: &str,
        params: &ListParams,
    ) -> CoreResult<PaginatedResponse<S3Bucket>> {
        require_non_empty("connection_id", connection_id)?;
        Ok(self
            .ctx
            .inventory
            .list_s3_buckets(connection_id, params)
            .await?)
    }

    /// 拉取连接下的全部 S3 桶（其余页并行请求）
    pub async fn all_s3_buckets(&self, connection_id: &str) -> CoreResult<Vec<S3Bucket>> {
        require_non_empty("connection_id", connection_id)?;
        let inventory = self.ctx.inventory.clone();
        let connection_id = connection_id.to_string();

        collect_pages(move |params| {
            let inventory = inventory.clone();
            let connection_id = connection_id.clone();
            async move { inventory.list_s3_buckets(&connection_id, &params).await }
        })
        .await
    }

    pub async fn dynamodb_table(
        &self,
        connection_id: &str,
        name: &str,
    ) -> CoreResult<DynamoDbTable> {
        require_non_empty("connection_id", connection_id)?;
        require_non_empty("name", name)?;
        self.ctx
            .inventory
            .get_dynamodb_table(connection_id, name)
            .await
            .map_err(|e| missing_as_not_found(e, "dynamodb table", connection_id, name))
    }

    pub async fn list_dynamodb_tables(
        &self,
        connection_id: &str,
        params: &ListParams,
    ) -> CoreResult<PaginatedResponse<DynamoDbTable>> {
        require_non_empty("connection_id", connection_id)?;
        Ok(self
            .ctx
            .inventory
            .list_dynamodb_tables(connection_id, params)
            .await?)
    }

    /// 拉取连接下的全部 DynamoDB 表（其余页并行请求）
    pub async fn all_dynamodb_tables(&self, connection_id: &str) -> CoreResult<Vec<DynamoDbTable>> {
        require_non_empty("connection_id", connection_id)?;
        let inventory = self.ctx.inventory.clone();
        let connection_id = connection_id.to_string();

        collect_pages(move |params| {
            let inventory = inventory.clone();
            let connection_id = connection_id.clone();
            async move { inventory.list_dynamodb_tables(&connection_id, &params).await }
        })
        .await
    }
}

fn missing_as_not_found(err: ApiError, kind: &str, connection_id: &str, name: &str) -> CoreError {
    if err.is_not_found() {
        CoreError::NotFound {
            kind: kind.to_string(),
            id: format!("{connection_id}/{name}"),
        }
    } else {
        err.into()
    }
}

/// Fetch page 1, then the remaining pages with at most
/// `MAX_CONCURRENT_PAGES` in flight, preserving order.
async fn collect_pages<T, F, Fut>(fetch: F) -> CoreResult<Vec<T>>
where
    F: Fn(ListParams) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, ApiError>>,
{
    let first = fetch(ListParams {
        page: 1,
        page_size: FULL_LIST_PAGE_SIZE,
    })
    .await?;

    let pages = first.total_count.div_ceil(FULL_LIST_PAGE_SIZE);
    let mut items = first.items;
    if pages <= 1 {
        return Ok(items);
    }

    let rest: Vec<PaginatedResponse<T>> = futures::stream::iter(2..=pages)
        .map(|page| {
            fetch(ListParams {
                page,
                page_size: FULL_LIST_PAGE_SIZE,
            })
        })
        .buffered(MAX_CONCURRENT_PAGES)
        .try_collect()
        .await?;

    for page in rest {
        items.extend(page.items);
    }
    Ok(items)
}
