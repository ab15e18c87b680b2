//! 事件回调服务
//!
//! Callbacks are replace-only; there is no update endpoint.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, found, require_found, unless_gone};
use crate::types::{Callback, CallbackRequest};
use crate::validation::{require_non_empty, validate_arn};

const KIND: &str = "callback";

/// 事件回调服务
pub struct CallbackService {
    ctx: Arc<ServiceContext>,
}

impl CallbackService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, request: CallbackRequest) -> CoreResult<Callback> {
        require_non_empty("name", &request.name)?;
        validate_arn("target_arn", &request.target_arn)?;
        if request.events.is_empty() {
            return Err(CoreError::validation(
                "events",
                "at least one event is required",
            ));
        }
        for event in &request.events {
            require_non_empty("events", event)?;
        }

        let callback = self.ctx.callbacks.create_callback(&request).await?;
        log::info!(
            "Created callback {} -> {}",
            callback.id,
            callback.target_arn
        );
        Ok(callback)
    }

    pub async fn read(&self, id: &str) -> CoreResult<Option<Callback>> {
        found(self.ctx.callbacks.get_callback(id).await, KIND, id)
    }

    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        if unless_gone(self.ctx.callbacks.delete_callback(id).await, KIND, id)?.is_some() {
            log::info!("Deleted callback {id}");
        }
        Ok(())
    }

    pub async fn import(&self, id: &str) -> CoreResult<Callback> {
        let callback = self.read(id).await?;
        require_found(callback, KIND, id)
    }
}
