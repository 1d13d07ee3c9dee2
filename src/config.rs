//! 客户端配置
//!
//! 默认值可以在构建时通过环境变量覆盖（`option_env!`，编译进 wasm）：
//! - `ROLLBOOK_API_BASE`：API 基础路径，默认 `/api`（由开发服务器代理到后端）
//! - `ROLLBOOK_API_TIMEOUT_MS`：单个请求的超时时间，默认 15000

use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// 令牌在 LocalStorage 中的键名
pub const TOKEN_STORAGE_KEY: &str = "token";
/// 认证失败时的跳转目标
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, timeout }
    }

    /// 读取构建时注入的配置
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("ROLLBOOK_API_BASE"),
            option_env!("ROLLBOOK_API_TIMEOUT_MS"),
        )
    }

    fn from_vars(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE);

        let timeout_ms = match timeout_ms.map(|s| s.trim().parse::<u64>()) {
            Some(Ok(ms)) if ms > 0 => ms,
            Some(_) => {
                warn!(
                    value = timeout_ms.unwrap_or_default(),
                    "invalid ROLLBOOK_API_TIMEOUT_MS, using default"
                );
                DEFAULT_TIMEOUT_MS
            }
            None => DEFAULT_TIMEOUT_MS,
        };

        Self::new(base_url, Duration::from_millis(timeout_ms))
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
