//! 会话管理
//!
//! 会话只有一个不透明的 bearer token。令牌存在即视为已认证，
//! 客户端不检查过期或签名，真正的鉴权由后端负责。
//!
//! 写入只发生在三处：登录（`establish`）、注销与认证失败（`teardown`）。

use crate::config::TOKEN_STORAGE_KEY;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// 令牌持久化后端
///
/// 浏览器中由 LocalStorage 实现；测试和非浏览器环境使用 [`MemoryTokenStore`]。
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// 当前令牌；空字符串视为不存在
    pub fn token(&self) -> Option<String> {
        self.store
            .get(TOKEN_STORAGE_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// 保存新令牌，覆盖旧的
    pub fn establish(&self, token: &str) -> bool {
        debug!("session established");
        self.store.set(TOKEN_STORAGE_KEY, token)
    }

    pub fn teardown(&self) {
        debug!("session torn down");
        self.store.delete(TOKEN_STORAGE_KEY);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// 内存中的令牌存储
#[derive(Default)]
pub struct MemoryTokenStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(TOKEN_STORAGE_KEY, token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .lock()
            .map(|mut items| items.insert(key.to_string(), value.to_string()))
            .is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        self.items
            .lock()
            .map(|mut items| items.remove(key))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_presence_is_the_only_signal() {
        let session = Session::new(Arc::new(MemoryTokenStore::new()));
        assert!(!session.is_authenticated());

        session.establish("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));

        session.establish("def");
        assert_eq!(session.token().as_deref(), Some("def"));

        session.teardown();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let session = Session::new(Arc::new(MemoryTokenStore::with_token("")));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn clones_share_the_same_store() {
        let session = Session::new(Arc::new(MemoryTokenStore::new()));
        let other = session.clone();
        session.establish("abc");
        assert!(other.is_authenticated());
        other.teardown();
        assert!(!session.is_authenticated());
    }
}
