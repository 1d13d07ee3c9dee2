//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 [`HttpClient`]，替代 `gloo-net`。
//! 超时由 `AbortController` 与定时器竞速实现。

use super::timer::sleep;
use async_trait::async_trait;
use futures::future::{Either, select};
use rollbook::request::{HttpClient, HttpRequest, HttpResponse, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

/// 基于 `window.fetch` 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn build(req: &HttpRequest, controller: Option<&AbortController>) -> Result<Request, TransportError> {
        let headers = Headers::new()
            .map_err(|e| TransportError::Build(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| TransportError::Build(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }
        if let Some(controller) = controller {
            opts.set_signal(Some(&controller.signal()));
        }

        Request::new_with_str_and_init(&req.url, &opts).map_err(|e| TransportError::Build(format!("{:?}", e)))
    }

    async fn fetch(request: Request) -> Result<HttpResponse, TransportError> {
        let window = web_sys::window().ok_or_else(|| TransportError::Network("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| TransportError::Network(format!("Response 类型转换失败: {:?}", e)))?;

        let status = response.status();
        let promise = response
            .text()
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?;
        let body = JsFuture::from(promise)
            .await
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let Some(timeout) = req.timeout else {
            return Self::fetch(Self::build(&req, None)?).await;
        };

        let controller = AbortController::new().map_err(|e| TransportError::Build(format!("{:?}", e)))?;
        let request = Self::build(&req, Some(&controller))?;

        let fetch = Box::pin(Self::fetch(request));
        let timer = Box::pin(sleep(timeout));

        match select(fetch, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                controller.abort();
                Err(TransportError::Timeout(timeout))
            }
        }
    }
}
