//! 页面工作流
//!
//! 与渲染无关的列表和表单流程。组件只负责把结果写进信号。

pub mod editor;
pub mod list;

pub use editor::{FormMode, SubmitError, load_for_edit, submit};
pub use list::{DeleteOutcome, ListViewState, LoadPhase, RowKey, delete_student, load_students};
