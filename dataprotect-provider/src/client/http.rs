//! Control-plane HTTP 请求方法

use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ErrorMapper, RawApiError};
use crate::types::{ListParams, PaginatedResponse, Submission, TaskHandle};
use crate::utils::log_sanitizer::truncate_for_log;

use super::ControlPlaneClient;

/// Header carrying a per-call key so retried POSTs are applied once.
const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// List endpoints answer `{"items": [...], "total_count": n}`.
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    items: Vec<T>,
    #[serde(default)]
    total_count: Option<u32>,
}

impl ControlPlaneClient {
    /// Send with the configured retry budget and map non-2xx answers.
    async fn send(
        &self,
        request: RequestBuilder,
        method_name: &str,
        url: &str,
        max_retries: u32,
        context: ErrorContext,
    ) -> Result<(u16, String)> {
        let request = request.bearer_auth(&self.config.api_token);
        let (status, text) =
            HttpUtils::execute_request_with_retry(request, method_name, url, max_retries).await?;

        if (200..300).contains(&status) {
            return Ok((status, text));
        }

        let err = self.map_error(raw_error(status, &text), context);
        if err.is_expected() {
            log::warn!("{method_name} {url} failed: {err}");
        } else {
            log::error!("{method_name} {url} failed: {err}");
        }
        Err(err)
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let (_, text) = self
            .send(
                self.client.get(&url),
                "GET",
                &url,
                self.config.max_retries,
                context,
            )
            .await?;
        HttpUtils::parse_json(&text)
    }

    /// 执行 GET 请求（不重试）
    ///
    /// Used for task status reads: a failed read ends the poll session, so the
    /// transport must not hide it behind retries.
    pub(crate) async fn get_once<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let (_, text) = self
            .send(self.client.get(&url), "GET", &url, 0, context)
            .await?;
        HttpUtils::parse_json(&text)
    }

    /// 执行 GET 请求 (带分页)
    pub(crate) async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
        context: ErrorContext,
    ) -> Result<PaginatedResponse<T>> {
        let params = params.validated();
        let envelope: ListEnvelope<T> = self
            .get(&format!("{path}{}", params.to_query()), context)
            .await?;

        let total_count = envelope
            .total_count
            .unwrap_or_else(|| u32::try_from(envelope.items.len()).unwrap_or(u32::MAX));

        Ok(PaginatedResponse::new(
            envelope.items,
            params.page,
            params.page_size,
            total_count,
        ))
    }

    /// 执行 POST 请求
    ///
    /// Every call gets a fresh idempotency key; retries of the same call
    /// reuse it.
    pub(crate) async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<Submission<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self
            .client
            .post(&url)
            .header(IDEMPOTENCY_KEY_HEADER, uuid::Uuid::new_v4().to_string())
            .header(CONTENT_TYPE, "application/json")
            .body(encode_body(body)?);

        let (status, text) = self
            .send(request, "POST", &url, self.config.max_retries, context)
            .await?;
        self.decode_submission(status, &text)
    }

    /// 执行 PATCH 请求
    pub(crate) async fn patch<B, T>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<Submission<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self
            .client
            .patch(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(encode_body(body)?);

        let (status, text) = self
            .send(request, "PATCH", &url, self.config.max_retries, context)
            .await?;
        self.decode_submission(status, &text)
    }

    /// 执行 DELETE 请求
    ///
    /// 200/204 complete inline regardless of body; 202 carries a task handle.
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<Submission<()>> {
        let url = self.url(path);
        let (status, text) = self
            .send(
                self.client.delete(&url),
                "DELETE",
                &url,
                self.config.max_retries,
                context,
            )
            .await?;

        if status == 202 {
            return self.task_handle(&text).map(Submission::Deferred);
        }
        Ok(Submission::Immediate(()))
    }

    fn decode_submission<T: DeserializeOwned>(
        &self,
        status: u16,
        text: &str,
    ) -> Result<Submission<T>> {
        if status == 202 {
            return self.task_handle(text).map(Submission::Deferred);
        }
        HttpUtils::parse_json(text).map(Submission::Immediate)
    }

    fn task_handle(&self, text: &str) -> Result<TaskHandle> {
        let handle: TaskHandle = HttpUtils::parse_json(text)?;
        if handle.task_id.trim().is_empty() {
            return Err(self.parse_error("HTTP 202 response carried an empty task_id"));
        }
        log::debug!("Accepted as task {}", handle.task_id);
        Ok(handle)
    }

    /// Unwrap a submission from an endpoint that always completes inline.
    pub(crate) fn expect_immediate<T>(&self, submission: Submission<T>) -> Result<T> {
        match submission {
            Submission::Immediate(value) => Ok(value),
            Submission::Deferred(handle) => Err(ApiError::Unknown {
                status: Some(202),
                raw_code: None,
                raw_message: format!(
                    "operation was accepted as task {} on an endpoint that completes inline",
                    handle.task_id
                ),
            }),
        }
    }
}

/// Serialize a request body up front so the request stays cloneable for retry.
fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| ApiError::SerializationError {
        detail: e.to_string(),
    })
}

/// Extract code and message from an error response, falling back to the raw body.
fn raw_error(status: u16, text: &str) -> RawApiError {
    match serde_json::from_str::<ErrorEnvelope>(text) {
        Ok(ErrorEnvelope {
            error: ErrorBody { code, message },
        }) => {
            let message = message.unwrap_or_else(|| format!("HTTP {status}"));
            match code {
                Some(code) => RawApiError::with_code(status, code, message),
                None => RawApiError::new(status, message),
            }
        }
        Err(_) if text.trim().is_empty() => RawApiError::new(status, format!("HTTP {status}")),
        Err(_) => RawApiError::new(status, truncate_for_log(text)),
    }
}
