//! Rollbook 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `rollbook::route` / `rollbook::gate`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态与 API 客户端
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod login;
    pub mod navbar;
    pub mod register;
    pub mod student_form;
    pub mod student_list;
}
pub mod web;

use crate::auth::{AuthContext, build_api};
use crate::components::login::LoginPage;
use crate::components::navbar::NavBar;
use crate::components::register::RegisterPage;
use crate::components::student_form::StudentFormPage;
use crate::components::student_list::StudentListPage;

use leptos::prelude::*;
use rollbook::AppRoute;
use rollbook::views::FormMode;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    if let Some(mode) = FormMode::from_route(&route) {
        return view! { <StudentFormPage mode=mode /> }.into_any();
    }

    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Students => view! { <StudentListPage /> }.into_any(),
        _ => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Students class="btn btn-link mt-4">"Back to students"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建 API 客户端与认证上下文（认证状态取自 LocalStorage 中的令牌）
    let api = build_api();
    let auth_ctx = AuthContext::new(&api);
    provide_context(api);
    provide_context(auth_ctx);

    // 2. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 3. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 font-sans">
                <Show when=move || is_authenticated.get()>
                    <NavBar />
                </Show>
                <RouterOutlet matcher=route_matcher />
            </div>
        </Router>
    }
}
