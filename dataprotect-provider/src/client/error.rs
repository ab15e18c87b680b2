//! Control-plane error mapping

use crate::error::ApiError;
use crate::traits::{ErrorContext, ErrorMapper, RawApiError};

use super::ControlPlaneClient;

/// Maps the `{"error": {"code", "message"}}` envelope plus HTTP status onto
/// [`ApiError`]. Explicit error codes win over the status class.
impl ErrorMapper for ControlPlaneClient {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError {
        let resource = context.resource.unwrap_or_else(|| "object".to_string());

        match (raw.status, raw.code.as_deref()) {
            // 凭证无效 / 过期
            (401, _) | (_, Some("unauthenticated" | "invalid_token" | "token_expired")) => {
                ApiError::InvalidCredentials {
                    raw_message: Some(raw.message),
                }
            }

            (403, _) | (_, Some("forbidden" | "permission_denied")) => {
                ApiError::PermissionDenied {
                    raw_message: Some(raw.message),
                }
            }

            (404, _) | (_, Some("not_found")) => ApiError::NotFound {
                resource,
                id: context.id.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            (409, _) | (_, Some("conflict" | "already_exists")) => ApiError::Conflict {
                resource,
                raw_message: Some(raw.message),
            },

            // 参数错误：code 形如 `invalid_<field>` 时取出字段名
            (400 | 422, code) => ApiError::InvalidParameter {
                param: code
                    .and_then(|c| c.strip_prefix("invalid_"))
                    .unwrap_or("request")
                    .to_string(),
                detail: raw.message,
            },

            (429, _) => ApiError::RateLimited {
                retry_after: None,
                raw_message: Some(raw.message),
            },

            (500..=599, _) => ApiError::ServerError {
                status: raw.status,
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
