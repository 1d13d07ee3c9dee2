//! 表单字段组件
//!
//! 纯粹的输入渲染：标签、输入框和字段下方的错误提示。

use leptos::prelude::*;

/// 字段下方的错误提示
#[component]
fn FieldError(error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <label class="label">
                <span class="label-text-alt text-error">{move || error.get().unwrap_or_default()}</span>
            </label>
        </Show>
    }
}

/// 单行输入
#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    error: Signal<Option<String>>,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            <input id=id
                type=input_type
                class="input input-bordered w-full"
                class:input-error=move || error.get().is_some()
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
            />
            <FieldError error=error />
        </div>
    }
}

/// 多行输入
#[component]
pub fn TextAreaField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            <textarea id=id
                rows="3"
                class="textarea textarea-bordered w-full"
                class:textarea-error=move || error.get().is_some()
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
            ></textarea>
            <FieldError error=error />
        </div>
    }
}

/// 下拉选择；`options` 为 (值, 显示文本)
#[component]
pub fn SelectField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    error: Signal<Option<String>>,
    options: Vec<(&'static str, &'static str)>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            <select id=id
                class="select select-bordered w-full"
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(val, text)| view! {
                        <option value=val selected=move || value.get() == val>{text}</option>
                    })
                    .collect_view()}
            </select>
            <FieldError error=error />
        </div>
    }
}
