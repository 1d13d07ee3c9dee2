//! 学生列表工作流
//!
//! 状态机：`Loading → Ready | Failed`。`Ready` 状态下可以反复删除，
//! 删除成功只在本地移除对应记录，不会重新拉取。

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::host::Confirm;
use crate::request::HttpClient;
use rollbook_shared::StudentRecord;
use tracing::{info, warn};

pub const LOAD_FAILED: &str = "Failed to fetch students";
pub const DELETE_FAILED: &str = "Failed to delete student";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListViewState {
    pub phase: LoadPhase,
    pub records: Vec<StudentRecord>,
    /// 最近一次加载或删除失败的提示
    pub error: Option<String>,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self::loading()
    }
}

impl ListViewState {
    pub fn loading() -> Self {
        Self {
            phase: LoadPhase::Loading,
            records: Vec::new(),
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// 把加载结果转换为视图状态
    ///
    /// 响应形状错误降级为空列表加提示；其它错误进入 `Failed`。
    pub fn from_result(result: Result<Vec<StudentRecord>, ApiError>) -> Self {
        match result {
            Ok(records) => Self {
                phase: LoadPhase::Ready,
                records,
                error: None,
            },
            Err(err @ ApiError::Format(_)) => Self {
                phase: LoadPhase::Ready,
                records: Vec::new(),
                error: Some(err.user_message()),
            },
            Err(_) => Self {
                phase: LoadPhase::Failed,
                records: Vec::new(),
                error: Some(LOAD_FAILED.to_string()),
            },
        }
    }

    /// 带渲染键的行；没有标识符的记录用行号区分
    pub fn keyed_rows(&self) -> Vec<(RowKey, StudentRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let key = match record.record_id() {
                    Some(id) => RowKey::Id(id.to_string()),
                    None => RowKey::Position(index),
                };
                (key, record.clone())
            })
            .collect()
    }

    /// 应用一次删除结果
    pub fn apply_delete(&mut self, outcome: &DeleteOutcome) {
        match outcome {
            DeleteOutcome::Cancelled => {}
            DeleteOutcome::Deleted { id } => {
                if let Some(pos) = self
                    .records
                    .iter()
                    .position(|r| r.record_id() == Some(id.as_str()))
                {
                    self.records.remove(pos);
                }
                self.error = None;
            }
            DeleteOutcome::Failed { message, .. } => {
                self.error = Some(message.clone());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// 用户取消，没有发出请求
    Cancelled,
    Deleted { id: String },
    Failed { id: Option<String>, message: String },
}

pub async fn load_students<C: HttpClient>(api: &ApiClient<C>) -> ListViewState {
    let result = api.list_students().await;
    match &result {
        Ok(records) => info!(count = records.len(), "students loaded"),
        Err(err) => warn!(error = %err, "failed to load students"),
    }
    ListViewState::from_result(result)
}

/// 确认后删除一条记录
pub async fn delete_student<C: HttpClient>(
    api: &ApiClient<C>,
    confirm: &dyn Confirm,
    record: &StudentRecord,
) -> DeleteOutcome {
    if !confirm.confirm(DELETE_PROMPT) {
        return DeleteOutcome::Cancelled;
    }

    let Some(id) = record.record_id().map(str::to_string) else {
        warn!(name = %record.name, "record has no identifier, cannot delete");
        return DeleteOutcome::Failed {
            id: None,
            message: DELETE_FAILED.to_string(),
        };
    };

    match api.delete_student(&id).await {
        Ok(()) => {
            info!(id = %id, "student deleted");
            DeleteOutcome::Deleted { id }
        }
        Err(err) => {
            warn!(id = %id, error = %err, "failed to delete student");
            DeleteOutcome::Failed {
                id: Some(id),
                message: DELETE_FAILED.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests;
