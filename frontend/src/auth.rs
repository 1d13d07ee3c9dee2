//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//! 令牌本身由核心库的 `Session` 持有，这里的信号只是它的响应式镜像。

use crate::web::{BrowserNavigator, BrowserTokenStore, FetchHttpClient};
use leptos::prelude::*;
use rollbook::auth::{self, AuthError};
use rollbook::{ApiClient, ClientConfig, Session};
use rollbook_shared::UserProfile;
use std::sync::Arc;

/// 浏览器中使用的 API 客户端
pub type AppApi = ApiClient<FetchHttpClient>;

/// 构造 API 客户端：令牌存放在 LocalStorage，认证失败时整页跳转
pub fn build_api() -> AppApi {
    let session = Session::new(Arc::new(BrowserTokenStore));
    ApiClient::new(
        FetchHttpClient,
        ClientConfig::from_build_env(),
        session,
        Arc::new(BrowserNavigator),
    )
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> AppApi {
    expect_context::<AppApi>()
}

/// 认证上下文
///
/// 通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 是否已认证
    pub is_authenticated: RwSignal<bool>,
    /// 跨页面的一次性提示（例如注册成功后在登录页显示）
    pub notice: RwSignal<Option<String>>,
}

impl AuthContext {
    /// 创建新的认证上下文，初始状态取自持久化的令牌
    pub fn new(api: &AppApi) -> Self {
        Self {
            is_authenticated: RwSignal::new(api.session().is_authenticated()),
            notice: RwSignal::new(None),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        self.is_authenticated.into()
    }

    /// 与会话重新同步
    pub fn sync(&self, api: &AppApi) {
        self.is_authenticated.set(api.session().is_authenticated());
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// 登录并保存令牌
///
/// 成功后认证信号翻转，路由服务负责离开登录页。
pub async fn login(ctx: &AuthContext, api: &AppApi, username: String, password: String) -> Result<(), AuthError> {
    let result = auth::login(api, &username, &password).await;
    ctx.sync(api);
    result
}

pub async fn register(api: &AppApi, username: String, email: String, password: String) -> Result<UserProfile, AuthError> {
    auth::register(api, &username, &email, &password).await
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext, api: &AppApi) {
    auth::logout(api);
    ctx.sync(api);
}
