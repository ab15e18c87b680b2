//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use dataprotect_provider::{ClientConfig, ControlPlaneClient, create_client};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token-0123456789";

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Client pointed at a mock server, with the default retry budget.
pub fn client_for(server: &MockServer) -> Arc<ControlPlaneClient> {
    client_with_retries(server, 2)
}

pub fn client_with_retries(server: &MockServer, max_retries: u32) -> Arc<ControlPlaneClient> {
    let config = ClientConfig::new(server.uri(), TEST_TOKEN).with_max_retries(max_retries);
    match create_client(config) {
        Ok(client) => client,
        Err(e) => panic!("failed to create client for mock server: {e}"),
    }
}

pub fn error_body(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({ "error": { "code": code, "message": message } })
}
