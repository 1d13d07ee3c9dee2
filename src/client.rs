//! API 客户端
//!
//! 所有请求都经过两个拦截点：
//! - 发出前：会话中存在令牌时附加 `Authorization: Bearer <token>`
//! - 返回后：401/403 销毁会话并硬跳转到登录页，然后把错误继续抛给调用方
//!
//! 其它错误原样交给调用方在本地处理。

use crate::config::{ClientConfig, LOGIN_PATH};
use crate::error::{ApiError, ApiResult};
use crate::host::Navigator;
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::session::Session;
use rollbook_shared::protocol::ApiRequest;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ApiClient<C> {
    http: C,
    config: ClientConfig,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl<C> ApiClient<C> {
    pub fn new(http: C, config: ClientConfig, session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            http,
            config,
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// 发送一个类型化请求
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let resp = self.dispatch(req).await?;
        resp.json::<R::Response>().map_err(|e| {
            warn!(path = %req.path(), error = %e, "response body did not match the expected type");
            ApiError::Format(e.to_string())
        })
    }

    /// 发送请求，只要求 2xx，不解析响应体
    ///
    /// 写操作的确认可能是任意文本（例如 `Deleted`）。
    pub async fn send_ack<R: ApiRequest>(&self, req: &R) -> ApiResult<()> {
        self.dispatch(req).await.map(|_| ())
    }

    async fn dispatch<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpResponse> {
        let http_req = self.build(req)?;
        let method = http_req.method;
        let url = http_req.url.clone();
        debug!(method = method.as_str(), url = %url, "api request");

        let resp = self.http.send(http_req).await.map_err(|e| {
            warn!(method = method.as_str(), url = %url, error = %e, "api request failed");
            ApiError::from(e)
        })?;

        self.intercept(resp)
    }

    fn build<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpRequest> {
        let mut http_req = HttpRequest::new(&self.config.url(&req.path()), R::METHOD)
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json")
            .with_timeout(self.config.timeout);

        if let Some(token) = self.session.token() {
            http_req = http_req.with_header("Authorization", &format!("Bearer {}", token));
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req).map_err(|e| ApiError::Encode(e.to_string()))?;
            http_req = http_req.with_body(body);
        }

        Ok(http_req)
    }

    /// 响应拦截
    fn intercept(&self, resp: HttpResponse) -> ApiResult<HttpResponse> {
        if matches!(resp.status, 401 | 403) {
            warn!(status = resp.status, "authentication rejected, tearing down session");
            self.session.teardown();
            self.navigator.redirect(LOGIN_PATH);
            return Err(ApiError::Unauthorized { status: resp.status });
        }

        if !resp.is_success() {
            return Err(ApiError::Status {
                status: resp.status,
                detail: extract_detail(&resp.body),
            });
        }

        Ok(resp)
    }
}

/// 从错误响应体中提取可读的详情
///
/// 支持 `{"detail": "..."}`、`{"detail": [{"msg": ...}]}` 与 `{"message": "..."}`。
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
