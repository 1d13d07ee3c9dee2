use crate::auth::use_api;
use crate::web::BrowserDialogs;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rollbook::views::{self, ListViewState, LoadPhase};
use rollbook::AppRoute;
use rollbook_shared::StudentRecord;

#[component]
pub fn StudentListPage() -> impl IntoView {
    let api = use_api();
    let state = RwSignal::new(ListViewState::loading());

    let load = {
        let api = api.clone();
        move || {
            state.set(ListViewState::loading());
            let api = api.clone();
            spawn_local(async move {
                let loaded = views::load_students(&api).await;
                // 页面已卸载时丢弃结果
                state.try_set(loaded);
            });
        }
    };

    // 初始加载
    load();

    let handle_delete = move |record: StudentRecord| {
        let api = api.clone();
        spawn_local(async move {
            let outcome = views::delete_student(&api, &BrowserDialogs, &record).await;
            state.try_update(|s| s.apply_delete(&outcome));
        });
    };

    let is_loading = move || state.with(ListViewState::is_loading);
    let row_count = move || state.with(|s| s.records.len());

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-semibold">"Students"</h1>
                <div class="flex gap-2">
                    <button
                        class="btn btn-ghost"
                        disabled=is_loading
                        on:click=move |_| load()
                    >
                        "Refresh"
                    </button>
                    <Link to=AppRoute::NewStudent class="btn btn-primary">"Add New Student"</Link>
                </div>
            </div>

            <Show when=move || state.with(|s| s.error.is_some())>
                <div role="alert" class="alert alert-error">
                    <span>{move || state.with(|s| s.error.clone().unwrap_or_default())}</span>
                </div>
            </Show>

            // 加载失败时只显示错误提示
            <div
                class="card bg-base-100 shadow-xl overflow-x-auto"
                class:hidden=move || state.with(|s| s.phase == LoadPhase::Failed)
            >
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Grade Level"</th>
                            <th>"Age"</th>
                            <th>"Role"</th>
                            <th class="hidden md:table-cell">"Last Updated"</th>
                            <th><span class="sr-only">"Actions"</span></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=is_loading>
                            <tr>
                                <td colspan="7" class="text-center py-8 text-base-content/50">
                                    <span class="loading loading-spinner loading-md"></span> " Loading..."
                                </td>
                            </tr>
                        </Show>
                        <Show when=move || !is_loading() && row_count() == 0>
                            <tr>
                                <td colspan="7" class="text-center py-8 text-base-content/50">
                                    "No students yet."
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || state.with(ListViewState::keyed_rows)
                            key=|(key, _)| key.clone()
                            children=move |(_, record)| {
                                let id = record.record_id().map(str::to_string);
                                let updated = record
                                    .updated_at
                                    .map(|t| t.display_short())
                                    .unwrap_or_else(|| "-".to_string());
                                let target = record.clone();
                                let handle_delete = handle_delete.clone();
                                view! {
                                    <tr>
                                        <td class="font-medium">{record.name.clone()}</td>
                                        <td class="opacity-70">{record.email.clone()}</td>
                                        <td>{record.grade_level.clone()}</td>
                                        <td>{record.age}</td>
                                        <td>
                                            <span class="badge badge-outline">{record.role.label()}</span>
                                        </td>
                                        <td class="hidden md:table-cell font-mono text-xs opacity-60">{updated}</td>
                                        <td class="text-right whitespace-nowrap">
                                            {id.map(|id| view! {
                                                <Link to=AppRoute::EditStudent(id) class="btn btn-ghost btn-sm">"Edit"</Link>
                                            })}
                                            <button
                                                class="btn btn-ghost btn-sm text-error"
                                                on:click=move |_| handle_delete(target.clone())
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>
    }
}
