//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 从服务端记录填充
//! - 数据到 [`StudentForm`] 的转换与实时校验

use leptos::prelude::*;
use rollbook::form::{Field, FieldErrors, StudentForm};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub grade_level: RwSignal<String>,
    pub description: RwSignal<String>,
    pub age: RwSignal<String>,
    pub address: RwSignal<String>,
    pub role: RwSignal<String>,

    /// 当前显示的字段错误
    pub errors: RwSignal<FieldErrors>,
    /// 是否已经提交失败过一次；之后每次输入都重新校验
    pub attempted: RwSignal<bool>,
}

impl FormState {
    /// 创建新的表单状态，所有字段使用新建模式的默认值
    pub fn new() -> Self {
        let defaults = StudentForm::default();
        Self {
            name: RwSignal::new(defaults.name),
            email: RwSignal::new(defaults.email),
            grade_level: RwSignal::new(defaults.grade_level),
            description: RwSignal::new(defaults.description),
            age: RwSignal::new(defaults.age),
            address: RwSignal::new(defaults.address),
            role: RwSignal::new(defaults.role),
            errors: RwSignal::new(FieldErrors::default()),
            attempted: RwSignal::new(false),
        }
    }

    /// 用编辑模式加载到的值填充
    pub fn fill(&self, form: StudentForm) {
        self.name.set(form.name);
        self.email.set(form.email);
        self.grade_level.set(form.grade_level);
        self.description.set(form.description);
        self.age.set(form.age);
        self.address.set(form.address);
        self.role.set(form.role);
    }

    /// 当前值（会追踪所有字段）
    pub fn snapshot(&self) -> StudentForm {
        StudentForm {
            name: self.name.get(),
            email: self.email.get(),
            grade_level: self.grade_level.get(),
            description: self.description.get(),
            age: self.age.get(),
            address: self.address.get(),
            role: self.role.get(),
        }
    }

    pub fn snapshot_untracked(&self) -> StudentForm {
        StudentForm {
            name: self.name.get_untracked(),
            email: self.email.get_untracked(),
            grade_level: self.grade_level.get_untracked(),
            description: self.description.get_untracked(),
            age: self.age.get_untracked(),
            address: self.address.get_untracked(),
            role: self.role.get_untracked(),
        }
    }

    /// 某个字段的错误信息
    pub fn error_for(&self, field: Field) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    }

    /// 首次提交失败后，字段变化时自动重新校验
    pub fn watch(&self) {
        let state = *self;
        Effect::new(move |_| {
            if !state.attempted.get() {
                return;
            }
            let errors = state.snapshot().validate().err().unwrap_or_default();
            state.errors.set(errors);
        });
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
