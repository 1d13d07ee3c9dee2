//! 学生表单页面（新建 / 编辑）

mod fields;
mod form_state;

use crate::auth::use_api;
use crate::web::BrowserDialogs;
use crate::web::router::use_router;
use fields::{SelectField, TextAreaField, TextField};
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rollbook::AppRoute;
use rollbook::form::Field;
use rollbook::views::{self, FormMode, SubmitError};
use rollbook_shared::Role;

#[component]
pub fn StudentFormPage(mode: FormMode) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let state = FormState::new();
    state.watch();

    let (loading, set_loading) = signal(mode.is_edit());
    let (submitting, set_submitting) = signal(false);

    // 编辑模式：加载记录，失败直接回到列表
    if let FormMode::Edit(id) = &mode {
        let api = api.clone();
        let id = id.clone();
        spawn_local(async move {
            match views::load_for_edit(&api, &id).await {
                Ok(form) => {
                    if set_loading.try_set(false).is_none() {
                        state.fill(form);
                    }
                }
                Err(e) if e.is_auth_failure() => {}
                Err(_) => router.navigate_to_route(AppRoute::Students),
            }
        });
    }

    let title = mode.title();
    let submit_label = mode.submit_label();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let form = state.snapshot_untracked();
        let api = api.clone();
        let mode = mode.clone();
        set_submitting.set(true);

        spawn_local(async move {
            match views::submit(&api, &mode, &form).await {
                Ok(()) => router.navigate_to_route(AppRoute::Students),
                Err(SubmitError::Invalid(errors)) => {
                    state.errors.try_set(errors);
                    state.attempted.try_set(true);
                }
                Err(err @ SubmitError::Rejected(_)) => {
                    if let Some(msg) = err.alert_message() {
                        BrowserDialogs::alert(&msg);
                    }
                }
            }
            set_submitting.try_set(false);
        });
    };

    let roles = vec![
        (Role::Student.as_str(), Role::Student.label()),
        (Role::Teacher.as_str(), Role::Teacher.label()),
    ];

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <h1 class="text-2xl font-semibold mb-6">{title}</h1>

            <Show when=move || loading.get()>
                <div class="flex justify-center py-8">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <form
                on:submit=on_submit
                class="card bg-base-100 shadow-xl card-body space-y-2"
                class:hidden=move || loading.get()
                novalidate
            >
                <TextField id="name" label="Name" value=state.name error=state.error_for(Field::Name) />
                <TextField id="email" label="Email" input_type="email"
                    value=state.email error=state.error_for(Field::Email) />

                <div class="grid grid-cols-2 gap-4">
                    <TextField id="grade_level" label="Grade Level"
                        value=state.grade_level error=state.error_for(Field::GradeLevel) />
                    <TextField id="age" label="Age" input_type="number"
                        value=state.age error=state.error_for(Field::Age) />
                </div>

                <TextAreaField id="description" label="Description"
                    value=state.description error=state.error_for(Field::Description) />
                <TextField id="address" label="Address"
                    value=state.address error=state.error_for(Field::Address) />
                <SelectField id="role" label="Role" options=roles
                    value=state.role error=state.error_for(Field::Role) />

                <div class="flex justify-end gap-4 pt-4">
                    <button type="button" class="btn btn-ghost"
                        on:click=move |_| router.navigate_to_route(AppRoute::Students)
                    >
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                        } else {
                            submit_label.into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
