use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

pub use rollbook_shared::protocol::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 传输层错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// 请求构建失败
    #[error("failed to build request: {0}")]
    Build(String),
    /// 网络请求失败（连接失败、CORS、被中止等）
    #[error("network error: {0}")]
    Network(String),
    /// 超过请求配置的超时时间
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: BTreeMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；空响应体（如 204）按 `null` 处理
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let body = self.body.trim();
        serde_json::from_str(if body.is_empty() { "null" } else { body })
    }
}

/// HTTP 客户端特性 (Trait)
///
/// (?Send) 是因为浏览器环境下 fetch 相关的 future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for &T {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试替身 (Mock)
// =========================================================

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    type Reply = Result<HttpResponse, TransportError>;

    /// 记录所有请求，并按 (method, url) 返回预设的响应
    ///
    /// 同一个 key 可以排队多个响应，最后一个会被重复使用。
    #[derive(Default)]
    pub struct MockHttpClient {
        pub requests: RefCell<Vec<HttpRequest>>,
        replies: RefCell<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
            let body = if body.is_null() { String::new() } else { body.to_string() };
            self.push(method, url, Ok(HttpResponse { status, body }));
        }

        pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.push(method, url, Ok(HttpResponse { status, body: body.to_string() }));
        }

        pub fn mock_failure(&self, method: HttpMethod, url: &str, err: TransportError) {
            self.push(method, url, Err(err));
        }

        fn push(&self, method: HttpMethod, url: &str, reply: Reply) {
            self.replies
                .borrow_mut()
                .entry((method, url.to_string()))
                .or_default()
                .push_back(reply);
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn calls_to(&self, method: HttpMethod, url: &str) -> Vec<HttpRequest> {
            self.requests
                .borrow()
                .iter()
                .filter(|r| r.method == method && r.url == url)
                .cloned()
                .collect()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
            let key = (req.method, req.url.clone());
            self.requests.borrow_mut().push(req);

            let mut replies = self.replies.borrow_mut();
            match replies.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
                Some(queue) if !queue.is_empty() => queue[0].clone(),
                _ => Err(TransportError::Network(format!("no mock for {} {}", key.0.as_str(), key.1))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_decodes_as_null() {
        let resp = HttpResponse { status: 204, body: String::new() };
        assert!(resp.is_success());
        let value: serde_json::Value = resp.json().unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn timeout_message_is_in_millis() {
        let err = TransportError::Timeout(Duration::from_secs(15));
        assert_eq!(err.to_string(), "request timed out after 15000 ms");
    }
}
