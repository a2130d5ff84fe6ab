use gloo_net::http::Method;
use shared::forms::{LoginRequest, SignupRequest};
use shared::{AuthResponse, Endpoint, MessageResponse, Page};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::nav;
use crate::storage::SessionStore;

pub const ADMIN_REQUIRED_MESSAGE: &str = "Access denied. Admin privileges required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    User,
    Admin,
}

impl LoginKind {
    fn endpoint(self) -> Endpoint {
        match self {
            LoginKind::User => Endpoint::Login,
            LoginKind::Admin => Endpoint::AdminLogin,
        }
    }

    pub fn fallback_message(self) -> &'static str {
        match self {
            LoginKind::User => "Login failed",
            LoginKind::Admin => "Admin login failed",
        }
    }
}

/// Logs in and persists the session. The returned page is where the
/// caller should navigate; storage is fully written by then.
pub async fn login(client: &ApiClient, kind: LoginKind, request: &LoginRequest) -> Result<Page, String> {
    let response: AuthResponse = client
        .send_json(Method::POST, &kind.endpoint(), request)
        .await
        .map_err(|err| err.user_message(kind.fallback_message()))?;

    if kind == LoginKind::Admin && !response.user.is_admin() {
        log::warn!("Admin login refused for non-admin account {}", response.user.email);
        return Err(ADMIN_REQUIRED_MESSAGE.to_string());
    }
    persist(&response)?;
    log::info!("Logged in as {}", response.user.email);
    Ok(Page::landing_for(response.user.role()))
}

pub async fn signup(client: &ApiClient, request: &SignupRequest) -> Result<Page, String> {
    let response: AuthResponse = client
        .send_json(Method::POST, &Endpoint::Signup, &request.body(client.mode()))
        .await
        .map_err(|err| err.user_message("Signup failed"))?;

    persist(&response)?;
    log::info!("Account created for {}", response.user.email);
    Ok(Page::landing_for(response.user.role()))
}

fn persist(response: &AuthResponse) -> Result<(), String> {
    SessionStore::save_login(response.token.as_deref(), &response.user)
        .map_err(|err| ClientError::from(err).user_message("Could not save session"))
}

/// Ends the session. Local state is cleared and the visitor is sent home
/// whatever the backend answers.
pub async fn logout(client: &ApiClient) {
    let result: Result<MessageResponse, ClientError> = client.send_empty(Method::POST, &Endpoint::Logout).await;
    if let Err(err) = result {
        log::error!("Logout request failed: {}", err);
    }
    SessionStore::clear();
    nav::redirect(Page::Index);
}
