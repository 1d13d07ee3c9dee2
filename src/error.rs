use crate::request::TransportError;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

/// API 客户端向调用方暴露的错误
///
/// - `Unauthorized`：401/403，会话已被拦截器销毁，调用方无需再处理
/// - `Timeout` / `Network`：网络类错误，只展示通用提示
/// - `Status`：其它非 2xx 响应，携带服务端返回的 detail
/// - `Format`：响应形状不符合预期
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required (status code {status})")]
    Unauthorized { status: u16 },
    #[error("Request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("Network Error: {0}")]
    Network(String),
    #[error("Request failed with status code {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("Unexpected response format: {0}")]
    Format(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Timeout(_) | ApiError::Network(_))
    }

    /// 服务端报告的错误详情
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// detail 优先，否则使用错误本身的描述
    pub fn detail_or_message(&self) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    /// 面向用户的通用提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { .. } => "Your session has expired. Please sign in again.".into(),
            ApiError::Timeout(_) | ApiError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".into()
            }
            ApiError::Format(_) => "Received an unexpected response from the server.".into(),
            ApiError::Status { .. } | ApiError::Encode(_) => self.detail_or_message(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(limit) => ApiError::Timeout(limit),
            TransportError::Network(msg) => ApiError::Network(msg),
            TransportError::Build(msg) => ApiError::Encode(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_message() {
        let err = ApiError::Status { status: 400, detail: Some("Email already registered".into()) };
        assert_eq!(err.detail_or_message(), "Email already registered");

        let err = ApiError::Status { status: 500, detail: None };
        assert_eq!(err.detail_or_message(), "Request failed with status code 500");
    }

    #[test]
    fn timeouts_are_network_class() {
        let err: ApiError = TransportError::Timeout(Duration::from_millis(15_000)).into();
        assert!(err.is_network());
        assert!(!err.is_auth_failure());
        assert_eq!(err.to_string(), "Request timed out after 15000 ms");
    }
}
