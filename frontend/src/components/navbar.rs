use crate::auth::{logout, use_api, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use rollbook::AppRoute;

/// 顶部导航栏，只在已登录时渲染
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let on_logout = move |_| {
        logout(&auth, &api);
        router.navigate_to_route(AppRoute::Login);
    };

    view! {
        <div class="navbar bg-base-100 shadow">
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Students class="btn btn-ghost text-xl">"Rollbook"</Link>
                <Link to=AppRoute::Students class="btn btn-ghost btn-sm">"Students"</Link>
                <Link to=AppRoute::NewStudent class="btn btn-ghost btn-sm">"Add Student"</Link>
            </div>
            <div class="flex-none">
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                    "Logout"
                </button>
            </div>
        </div>
    }
}
