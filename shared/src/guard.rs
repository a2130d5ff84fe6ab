use crate::models::{Role, SessionInfo};
use crate::pages::Page;

#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Allow(SessionInfo),
    Redirect(Page),
}

/// Decides whether a protected page may render.
///
/// `session` is `None` when the session check failed for any reason,
/// network errors included; a body with `logged_in: false` counts the same.
pub fn decide(session: Option<SessionInfo>, required: Role) -> GuardDecision {
    match session.filter(|session| session.logged_in) {
        None => GuardDecision::Redirect(Page::login_for(required)),
        Some(session) if !session.role().satisfies(required) => GuardDecision::Redirect(Page::Dashboard),
        Some(session) => GuardDecision::Allow(session),
    }
}

/// Login and signup pages send visitors who already have a session to
/// their landing page.
pub fn auth_page_redirect(session: Option<&SessionInfo>) -> Option<Page> {
    session
        .filter(|session| session.logged_in)
        .map(|session| Page::landing_for(session.role()))
}

/// Where a 401 on a data request sends the visitor. The backend's own
/// `redirect` wins when it names one.
pub fn expired_session_target(redirect: Option<&str>, required: Role) -> String {
    redirect
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Page::login_for(required).href())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> SessionInfo {
        SessionInfo {
            logged_in: true,
            user_id: None,
            user_name: Some("Ann".into()),
            user_role: Some(role),
        }
    }

    #[test]
    fn no_session_goes_to_matching_login() {
        assert_eq!(decide(None, Role::User), GuardDecision::Redirect(Page::Login));
        assert_eq!(decide(None, Role::Admin), GuardDecision::Redirect(Page::AdminLogin));
    }

    #[test]
    fn logged_out_body_counts_as_no_session() {
        let body = SessionInfo::default();
        assert_eq!(decide(Some(body), Role::User), GuardDecision::Redirect(Page::Login));
    }

    #[test]
    fn user_on_admin_page_goes_to_dashboard() {
        assert_eq!(
            decide(Some(session(Role::User)), Role::Admin),
            GuardDecision::Redirect(Page::Dashboard)
        );
    }

    #[test]
    fn sufficient_role_is_allowed() {
        assert_eq!(
            decide(Some(session(Role::User)), Role::User),
            GuardDecision::Allow(session(Role::User))
        );
        assert_eq!(
            decide(Some(session(Role::Admin)), Role::User),
            GuardDecision::Allow(session(Role::Admin))
        );
        assert_eq!(
            decide(Some(session(Role::Admin)), Role::Admin),
            GuardDecision::Allow(session(Role::Admin))
        );
    }

    #[test]
    fn missing_role_is_treated_as_user() {
        let mut no_role = session(Role::User);
        no_role.user_role = None;
        assert_eq!(decide(Some(no_role), Role::Admin), GuardDecision::Redirect(Page::Dashboard));
    }

    #[test]
    fn auth_pages_redirect_signed_in_visitors() {
        assert_eq!(auth_page_redirect(None), None);
        assert_eq!(auth_page_redirect(Some(&SessionInfo::default())), None);
        assert_eq!(auth_page_redirect(Some(&session(Role::User))), Some(Page::Dashboard));
        assert_eq!(auth_page_redirect(Some(&session(Role::Admin))), Some(Page::AdminDashboard));
    }

    #[test]
    fn expired_session_prefers_backend_redirect() {
        assert_eq!(expired_session_target(Some("/login.html"), Role::Admin), "/login.html");
        assert_eq!(expired_session_target(Some("  "), Role::Admin), "/admin-login.html");
        assert_eq!(expired_session_target(None, Role::User), "/login.html");
    }
}
