use serde::{Deserialize, Serialize};

pub mod date;
pub mod normalize;
pub mod protocol;

pub use date::ServerTime;
pub use normalize::{ListPayload, NormalizeError};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STUDENTS_PATH: &str = "/v1/students/";
pub const AUTH_LOGIN_PATH: &str = "/v1/auth/login";
pub const AUTH_REGISTER_PATH: &str = "/v1/auth/register";

pub const NAME_LEN: (usize, usize) = (2, 50);
pub const ADDRESS_LEN: (usize, usize) = (10, 200);
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const GRADE_RANGE: (u32, u32) = (1, 12);
pub const AGE_RANGE: (u32, u32) = (5, 17);

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        }
    }
}

/// 规范化之后的学生记录
///
/// 服务端的 `id` / `_id` 两种主键写法在这里都会被填上，
/// `grade_level` 总是存在（缺失时由 `grade` 推导）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub legacy_id: Option<String>,
    pub name: String,
    pub email: String,
    pub grade: Option<u32>,
    pub grade_level: String,
    pub age: u32,
    pub address: String,
    pub description: Option<String>,
    pub role: Role,
    pub created_at: Option<ServerTime>,
    pub updated_at: Option<ServerTime>,
}

impl StudentRecord {
    /// 发给后端的标识符：`id` 优先，回退到 `_id`
    pub fn record_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.legacy_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// 表单中显示的年级字符串
    ///
    /// 数值 `grade` 是权威值；只有缺失时才使用服务端给出的 `grade_level`。
    pub fn form_grade_level(&self) -> String {
        match self.grade {
            Some(grade) => grade_to_level(grade),
            None => self.grade_level.clone(),
        }
    }
}

/// 创建 / 更新时的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    pub email: String,
    pub grade: u32,
    pub age: u32,
    pub address: String,
    pub description: String,
}

// =========================================================
// grade <-> grade_level
// =========================================================

pub fn grade_to_level(grade: u32) -> String {
    grade.to_string()
}

/// 解析年级字符串；与整数解析一致，前后空白会被忽略
pub fn level_to_grade(level: &str) -> Option<u32> {
    level.trim().parse::<u32>().ok()
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_conversion_is_consistent() {
        for grade in GRADE_RANGE.0..=GRADE_RANGE.1 {
            assert_eq!(level_to_grade(&grade_to_level(grade)), Some(grade));
        }
        assert_eq!(level_to_grade(" 7 "), Some(7));
        assert_eq!(level_to_grade("seven"), None);
    }

    #[test]
    fn role_round_trips_through_serde() {
        let json = serde_json::to_string(&Role::Teacher).unwrap();
        assert_eq!(json, "\"teacher\"");
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
    }
}
