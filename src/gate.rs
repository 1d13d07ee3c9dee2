//! 认证守卫
//!
//! 只检查令牌是否存在，不做服务端校验。

use crate::route::AppRoute;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// 允许进入
    Allow(AppRoute),
    /// 重定向；`from` 保存被拦截的受保护路由，登录后可返回
    Redirect { to: AppRoute, from: Option<AppRoute> },
}

impl GateDecision {
    /// 最终应当渲染的路由
    pub fn route(&self) -> &AppRoute {
        match self {
            GateDecision::Allow(route) => route,
            GateDecision::Redirect { to, .. } => to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, GateDecision::Redirect { .. })
    }
}

pub fn evaluate(target: AppRoute, authenticated: bool) -> GateDecision {
    if target.requires_auth() && !authenticated {
        return GateDecision::Redirect {
            to: AppRoute::auth_failure_redirect(),
            from: Some(target),
        };
    }

    if target.should_redirect_when_authenticated() && authenticated {
        return GateDecision::Redirect {
            to: AppRoute::auth_success_redirect(),
            from: None,
        };
    }

    GateDecision::Allow(target)
}

/// 登录后的返回目标
///
/// 守卫拦截受保护路由时记下它；下一次登录成功的跳转取出并清空，
/// 没有记录时回到学生列表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnTo {
    pending: Option<AppRoute>,
}

impl ReturnTo {
    pub fn pending(&self) -> Option<&AppRoute> {
        self.pending.as_ref()
    }

    /// 执行守卫并返回最终应当渲染的路由
    pub fn resolve(&mut self, target: AppRoute, authenticated: bool) -> AppRoute {
        match evaluate(target, authenticated) {
            GateDecision::Allow(route) => route,
            GateDecision::Redirect { to, from } => {
                info!(to = %to, from = ?from.as_ref().map(AppRoute::to_path), "route guard redirect");
                if from.is_some() {
                    self.pending = from;
                }
                if to == AppRoute::auth_success_redirect() {
                    self.take()
                } else {
                    to
                }
            }
        }
    }

    /// 取出登录成功后的去向
    pub fn take(&mut self) -> AppRoute {
        self.pending.take().unwrap_or_else(AppRoute::auth_success_redirect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_route_without_token_redirects_to_login() {
        let decision = evaluate(AppRoute::EditStudent("abc".into()), false);
        assert_eq!(
            decision,
            GateDecision::Redirect {
                to: AppRoute::Login,
                from: Some(AppRoute::EditStudent("abc".into())),
            }
        );
        assert_eq!(decision.route().to_path(), "/login");
    }

    #[test]
    fn protected_route_with_token_is_allowed() {
        assert_eq!(
            evaluate(AppRoute::Students, true),
            GateDecision::Allow(AppRoute::Students)
        );
    }

    #[test]
    fn public_routes_are_always_reachable_anonymously() {
        for route in [AppRoute::Login, AppRoute::Register, AppRoute::NotFound] {
            assert!(!evaluate(route, false).is_redirect());
        }
    }

    #[test]
    fn signed_in_users_skip_login_and_register() {
        for route in [AppRoute::Login, AppRoute::Register] {
            assert_eq!(
                evaluate(route, true),
                GateDecision::Redirect { to: AppRoute::Students, from: None }
            );
        }
        assert!(!evaluate(AppRoute::NotFound, true).is_redirect());
    }

    #[test]
    fn login_returns_to_the_intercepted_edit_page_once() {
        let mut return_to = ReturnTo::default();
        let edit = AppRoute::EditStudent("abc".into());

        assert_eq!(return_to.resolve(edit.clone(), false), AppRoute::Login);
        assert_eq!(return_to.pending(), Some(&edit));

        // 登录后仍停留在登录页，守卫把用户送回被拦截的页面
        assert_eq!(return_to.resolve(AppRoute::Login, true), edit);
        assert_eq!(return_to.pending(), None);

        // 再次登录没有记录，回到列表
        assert_eq!(return_to.resolve(AppRoute::Login, true), AppRoute::Students);
    }

    #[test]
    fn take_falls_back_to_the_list() {
        let mut return_to = ReturnTo::default();
        assert_eq!(return_to.take(), AppRoute::Students);

        return_to.resolve(AppRoute::NewStudent, false);
        assert_eq!(return_to.take(), AppRoute::NewStudent);
        assert_eq!(return_to.take(), AppRoute::Students);
    }

    #[test]
    fn latest_interception_wins_and_public_routes_keep_it() {
        let mut return_to = ReturnTo::default();
        return_to.resolve(AppRoute::NewStudent, false);
        return_to.resolve(AppRoute::EditStudent("b".into()), false);
        assert_eq!(return_to.resolve(AppRoute::Register, false), AppRoute::Register);

        assert_eq!(return_to.pending(), Some(&AppRoute::EditStudent("b".into())));
    }
}
