//! Rollbook 客户端核心
//!
//! 与平台无关的部分：请求抽象、会话、带拦截器的 API 客户端、
//! 路由与认证守卫、表单校验以及列表/表单工作流。
//! 浏览器相关的实现（fetch、LocalStorage、History）在 `rollbook-frontend` 中。

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod gate;
pub mod host;
pub mod request;
pub mod route;
pub mod session;
pub mod views;

mod students;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use form::{Field, FieldErrors, StudentForm};
pub use gate::GateDecision;
pub use host::{Confirm, Navigator};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use route::AppRoute;
pub use session::{MemoryTokenStore, Session, TokenStore};

pub use rollbook_shared as shared;
