//! 学生表单工作流（新建 / 编辑）

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::form::{FieldErrors, StudentForm};
use crate::request::HttpClient;
use crate::route::AppRoute;
use tracing::{info, warn};

/// 由路由中是否带有 id 决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

impl FormMode {
    pub fn from_route(route: &AppRoute) -> Option<Self> {
        match route {
            AppRoute::NewStudent => Some(Self::Create),
            AppRoute::EditStudent(id) => Some(Self::Edit(id.clone())),
            _ => None,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Add New Student",
            Self::Edit(_) => "Edit Student",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit(_) => "Update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// 客户端校验失败，没有发出请求
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    /// 后端拒绝或网络失败
    #[error(transparent)]
    Rejected(ApiError),
}

impl SubmitError {
    /// 阻塞式提示框的内容；校验错误只在字段旁显示，不弹框
    pub fn alert_message(&self) -> Option<String> {
        match self {
            SubmitError::Invalid(_) => None,
            SubmitError::Rejected(err) => Some(format!("Failed to save student: {}", err.detail_or_message())),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            SubmitError::Rejected(_) => None,
        }
    }
}

/// 编辑模式：拉取记录并转换为表单值
///
/// 失败时调用方应返回列表页，不显示行内错误。
pub async fn load_for_edit<C: HttpClient>(api: &ApiClient<C>, id: &str) -> Result<StudentForm, ApiError> {
    match api.get_student(id).await {
        Ok(record) => Ok(StudentForm::from_record(&record)),
        Err(err) => {
            warn!(id, error = %err, "failed to fetch student");
            Err(err)
        }
    }
}

/// 校验并提交；成功时恰好发出一次 POST 或 PUT
pub async fn submit<C: HttpClient>(api: &ApiClient<C>, mode: &FormMode, form: &StudentForm) -> Result<(), SubmitError> {
    let payload = form.validate().map_err(SubmitError::Invalid)?;

    let result = match mode {
        FormMode::Create => api.create_student(payload).await,
        FormMode::Edit(id) => api.update_student(id, payload).await,
    };

    match result {
        Ok(()) => {
            info!(edit = mode.is_edit(), "student saved");
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "failed to save student");
            Err(SubmitError::Rejected(err))
        }
    }
}
