use shared::guard::{GuardDecision, auth_page_redirect, decide, expired_session_target};
use shared::{AuthMode, Endpoint, MeResponse, Page, SessionInfo};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::nav;
use crate::storage::SessionStore;

/// Asks the backend who the visitor is. Any failure, network errors
/// included, means "not logged in" and discards the cached session.
pub async fn check_session(client: &ApiClient) -> Option<SessionInfo> {
    let session = query_session(client).await;
    if session.is_none() {
        SessionStore::clear();
    }
    session
}

async fn query_session(client: &ApiClient) -> Option<SessionInfo> {
    let result = match client.mode() {
        AuthMode::Cookie => client.get::<SessionInfo>(&Endpoint::Session).await,
        AuthMode::Bearer => {
            if SessionStore::token().is_none() {
                return None;
            }
            client
                .get::<MeResponse>(&Endpoint::Session)
                .await
                .map(|me| SessionInfo::from_user(&me.user))
        }
    };

    match result {
        Ok(session) if session.logged_in => Some(session),
        Ok(_) => None,
        Err(err) if err.is_unauthorized() => {
            log::info!("No active session");
            None
        }
        Err(err) => {
            log::warn!("Session check failed: {}", err);
            None
        }
    }
}

/// Runs the session guard for a protected page.
///
/// Redirects and returns `None` when the visitor may not see the page;
/// otherwise refreshes the cached session flags and returns the session.
pub async fn protect_page(client: &ApiClient, page: Page) -> Option<SessionInfo> {
    let required = page.required_role().unwrap_or_default();
    match decide(check_session(client).await, required) {
        GuardDecision::Allow(session) => {
            SessionStore::remember_session(&session);
            Some(session)
        }
        GuardDecision::Redirect(page) => {
            log::info!("Session guard redirecting to {}", page.as_ref());
            nav::redirect(page);
            None
        }
    }
}

/// Sends visitors who already have a session away from login and signup.
pub async fn prevent_auth_page_access(client: &ApiClient) {
    let session = check_session(client).await;
    if let Some(page) = auth_page_redirect(session.as_ref()) {
        nav::redirect(page);
    }
}

/// Ends a session the backend stopped honouring after the page guard
/// passed. Returns `false`, doing nothing, for errors other than a 401.
pub fn expire_session(err: &ClientError, page: Page) -> bool {
    let ClientError::Unauthorized { redirect, .. } = err else {
        return false;
    };
    log::info!("Session expired on {}", page.as_ref());
    SessionStore::clear();
    let required = page.required_role().unwrap_or_default();
    nav::redirect_to(&expired_session_target(redirect.as_deref(), required));
    true
}
