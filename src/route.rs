//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 注册页面
    Register,
    /// 学生列表 (默认路由，需要认证)
    #[default]
    Students,
    /// 新建学生 (需要认证)
    NewStudent,
    /// 编辑学生 (需要认证)
    EditStudent(String),
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段与末尾的 `/`。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Self::Students,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["students"] => Self::Students,
            ["students", "new"] => Self::NewStudent,
            ["students", id, "edit"] if !id.is_empty() => Self::EditStudent(id.to_string()),
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Students => "/students".to_string(),
            Self::NewStudent => "/students/new".to_string(),
            Self::EditStudent(id) => format!("/students/{}/edit", id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Students | Self::NewStudent | Self::EditStudent(_))
    }

    /// 定义已认证用户是否应该离开此路由（登录页、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Students
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Students);
        assert_eq!(AppRoute::from_path(""), AppRoute::Students);
        assert_eq!(AppRoute::from_path("/students"), AppRoute::Students);
        assert_eq!(AppRoute::from_path("/students/"), AppRoute::Students);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register?next=1"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/students/new"), AppRoute::NewStudent);
        assert_eq!(
            AppRoute::from_path("/students/64f1c0ffee/edit"),
            AppRoute::EditStudent("64f1c0ffee".into())
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        for path in ["/dashboard", "/students/abc", "/students//edit", "/students/a/edit/x"] {
            assert_eq!(AppRoute::from_path(path), AppRoute::NotFound, "{}", path);
        }
    }

    #[test]
    fn paths_round_trip() {
        let routes = [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Students,
            AppRoute::NewStudent,
            AppRoute::EditStudent("abc".into()),
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn only_student_pages_are_protected() {
        assert!(AppRoute::Students.requires_auth());
        assert!(AppRoute::EditStudent("x".into()).requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }
}
