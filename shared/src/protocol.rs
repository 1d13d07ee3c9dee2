use crate::{
    AUTH_LOGIN_PATH, AUTH_REGISTER_PATH, LoginRequest, RegisterRequest, STUDENTS_PATH,
    StudentPayload, TokenResponse, UserProfile,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Only POST and PUT carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// The request value itself is serialized as the body when the method carries one.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, relative to the API base.
    fn path(&self) -> String;
}

fn student_path(id: &str) -> String {
    format!("{}{}", STUDENTS_PATH, id)
}

// =========================================================
// Students
// =========================================================

/// List all students. The raw value is returned so the caller can classify its shape.
#[derive(Debug, Serialize)]
pub struct ListStudents;

impl ApiRequest for ListStudents {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        STUDENTS_PATH.to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct GetStudent {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for GetStudent {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        student_path(&self.id)
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CreateStudent(pub StudentPayload);

impl ApiRequest for CreateStudent {
    // The created record is not used; the client sends this with `send_ack`.
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        STUDENTS_PATH.to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateStudent {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub payload: StudentPayload,
}

impl ApiRequest for UpdateStudent {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        student_path(&self.id)
    }
}

/// Delete a student. 204 with an empty body is decoded as `null`.
#[derive(Debug, Serialize)]
pub struct DeleteStudent {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteStudent {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        student_path(&self.id)
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = TokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        AUTH_LOGIN_PATH.to_string()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        AUTH_REGISTER_PATH.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> StudentPayload {
        StudentPayload {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            grade: 7,
            age: 12,
            address: "12 Analytical Lane".into(),
            description: String::new(),
        }
    }

    #[test]
    fn update_body_omits_the_id() {
        let req = UpdateStudent { id: "abc".into(), payload: payload() };
        assert_eq!(req.path(), "/v1/students/abc");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "grade": 7,
                "age": 12,
                "address": "12 Analytical Lane",
                "description": "",
            })
        );
    }

    #[test]
    fn create_posts_to_the_collection() {
        let req = CreateStudent(payload());
        assert_eq!(req.path(), "/v1/students/");
        assert_eq!(CreateStudent::METHOD, HttpMethod::Post);
        assert_eq!(serde_json::to_value(&req).unwrap()["grade"], json!(7));
    }

    #[test]
    fn only_post_and_put_have_bodies() {
        assert!(!ListStudents::METHOD.has_body());
        assert!(!DeleteStudent::METHOD.has_body());
        assert!(UpdateStudent::METHOD.has_body());
    }
}
