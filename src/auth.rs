//! 登录、注册与注销

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::form::is_valid_email;
use crate::request::HttpClient;
use rollbook_shared::{LoginRequest, RegisterRequest, UserProfile};
use tracing::{info, warn};

pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// 客户端校验失败
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Invalid(msg) => msg.clone(),
            AuthError::Api(ApiError::Unauthorized { .. }) => "Incorrect username or password".into(),
            AuthError::Api(err) => err.user_message(),
        }
    }
}

/// 登录并建立会话
pub async fn login<C: HttpClient>(api: &ApiClient<C>, username: &str, password: &str) -> Result<(), AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::Invalid("Please fill in all fields".into()));
    }

    let req = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let token = api.send(&req).await?;

    if token.access_token.is_empty() {
        warn!("login succeeded but no token was issued");
        return Err(ApiError::Format("login response carried an empty access_token".into()).into());
    }
    if !token.token_type.eq_ignore_ascii_case("bearer") {
        warn!(token_type = %token.token_type, "unexpected token type, treating it as bearer");
    }

    api.session().establish(&token.access_token);
    info!(username, "signed in");
    Ok(())
}

/// 注册新用户（不会自动登录）
pub async fn register<C: HttpClient>(
    api: &ApiClient<C>,
    username: &str,
    email: &str,
    password: &str,
) -> Result<UserProfile, AuthError> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AuthError::Invalid("Please fill in all fields".into()));
    }
    if !is_valid_email(email) {
        return Err(AuthError::Invalid("Invalid email address".into()));
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AuthError::Invalid(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }

    let req = RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    let profile = api.send(&req).await?;
    info!(username = %profile.username, "registered");
    Ok(profile)
}

/// 注销：只清除会话，跳转由路由负责
pub fn logout<C>(api: &ApiClient<C>) {
    api.session().teardown();
    info!("signed out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::host::mock::RecordingNavigator;
    use crate::request::HttpMethod;
    use crate::request::mock::MockHttpClient;
    use crate::session::{MemoryTokenStore, Session};
    use serde_json::json;
    use std::sync::Arc;

    fn api(client: &MockHttpClient) -> (ApiClient<&MockHttpClient>, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::default());
        let session = Session::new(Arc::new(MemoryTokenStore::new()));
        let api = ApiClient::new(client, ClientConfig::default(), session, navigator.clone());
        (api, navigator)
    }

    #[tokio::test]
    async fn login_stores_the_issued_token() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "/api/v1/auth/login",
            200,
            json!({"access_token": "jwt-1", "token_type": "bearer"}),
        );
        let (api, _) = api(&client);

        login(&api, " alice ", "secret").await.unwrap();

        assert_eq!(api.session().token().as_deref(), Some("jwt-1"));
        let sent = client.calls_to(HttpMethod::Post, "/api/v1/auth/login");
        assert_eq!(sent.len(), 1);
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"username": "alice", "password": "secret"}));
    }

    #[tokio::test]
    async fn empty_fields_never_reach_the_server() {
        let client = MockHttpClient::new();
        let (api, _) = api(&client);

        let err = login(&api, "  ", "secret").await.unwrap_err();
        assert_eq!(err.user_message(), "Please fill in all fields");
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn wrong_password_reports_inline() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "/api/v1/auth/login",
            401,
            json!({"detail": "Incorrect username or password"}),
        );
        let (api, navigator) = api(&client);

        let err = login(&api, "alice", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Incorrect username or password");
        assert!(!api.session().is_authenticated());
        assert_eq!(navigator.visits(), vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn register_validates_before_sending() {
        let client = MockHttpClient::new();
        let (api, _) = api(&client);

        let err = register(&api, "bob", "not-an-email", "secret1").await.unwrap_err();
        assert_eq!(err, AuthError::Invalid("Invalid email address".into()));

        let err = register(&api, "bob", "bob@example.com", "123").await.unwrap_err();
        assert!(matches!(err, AuthError::Invalid(msg) if msg.contains("at least 6")));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn register_surfaces_server_detail() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "/api/v1/auth/register",
            400,
            json!({"detail": "Username already registered"}),
        );
        let (api, _) = api(&client);

        let err = register(&api, "bob", "bob@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.user_message(), "Username already registered");
    }

    #[test]
    fn logout_clears_the_session() {
        let client = MockHttpClient::new();
        let (api, _) = api(&client);
        api.session().establish("abc");
        logout(&api);
        assert!(!api.session().is_authenticated());
    }
}
