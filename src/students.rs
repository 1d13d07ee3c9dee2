use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use rollbook_shared::normalize::normalize_record;
use rollbook_shared::protocol::{CreateStudent, DeleteStudent, GetStudent, ListStudents, UpdateStudent};
use rollbook_shared::{ListPayload, StudentPayload, StudentRecord};
use tracing::{debug, warn};

impl<C: HttpClient> ApiClient<C> {
    /// 获取学生列表（已规范化）
    pub async fn list_students(&self) -> ApiResult<Vec<StudentRecord>> {
        let raw = self.send(&ListStudents).await?;

        let payload = ListPayload::classify(raw);
        if let ListPayload::Enveloped { key, .. } = &payload {
            debug!(key = %key, "student list arrived in an envelope");
        }

        payload.into_records().map_err(|e| {
            warn!(error = %e, "student list has an unexpected shape");
            ApiError::Format(e.to_string())
        })
    }

    pub async fn get_student(&self, id: &str) -> ApiResult<StudentRecord> {
        let raw = self.send(&GetStudent { id: id.to_string() }).await?;
        normalize_record(raw).map_err(ApiError::Format)
    }

    pub async fn create_student(&self, payload: StudentPayload) -> ApiResult<()> {
        self.send_ack(&CreateStudent(payload)).await
    }

    pub async fn update_student(&self, id: &str, payload: StudentPayload) -> ApiResult<()> {
        let req = UpdateStudent {
            id: id.to_string(),
            payload,
        };
        self.send_ack(&req).await
    }

    pub async fn delete_student(&self, id: &str) -> ApiResult<()> {
        self.send_ack(&DeleteStudent { id: id.to_string() }).await
    }
}
