use gloo_storage::errors::StorageError;
use shared::ApiErrorBody;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{}", .message.as_deref().unwrap_or("Not authenticated"))]
    Unauthorized {
        message: Option<String>,
        redirect: Option<String>,
    },
    #[error("{}", .message.as_deref().unwrap_or("Request failed"))]
    Server { status: u16, message: Option<String> },
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Browser error: {0}")]
    Browser(String),
}

impl ClientError {
    /// Normalizes a non-2xx response, pulling the server's message out of
    /// the JSON body when there is one.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed.text().map(str::to_string);
        if status == 401 {
            ClientError::Unauthorized {
                message,
                redirect: parsed.redirect,
            }
        } else {
            ClientError::Server { status, message }
        }
    }

    /// Text shown to the user, `fallback` when the server gave no message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ClientError::Unauthorized { message, .. } | ClientError::Server { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_string())
            }
            ClientError::Decode(_) => fallback.to_string(),
            ClientError::Browser(detail) => detail.clone(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}

impl From<StorageError> for ClientError {
    fn from(err: StorageError) -> Self {
        ClientError::Browser(format!("Could not save session: {}", err))
    }
}

impl From<gloo_net::Error> for ClientError {
    fn from(err: gloo_net::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_keeps_server_message() {
        let err = ClientError::from_status(401, r#"{"error": "Invalid credentials"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn unauthorized_redirect_is_captured() {
        let err = ClientError::from_status(401, r#"{"redirect": "/login.html"}"#);
        assert_eq!(
            err,
            ClientError::Unauthorized {
                message: None,
                redirect: Some("/login.html".into())
            }
        );
    }

    #[test]
    fn server_error_without_body_uses_fallback() {
        let err = ClientError::from_status(500, "<html>oops</html>");
        assert_eq!(err, ClientError::Server { status: 500, message: None });
        assert_eq!(err.user_message("Signup failed"), "Signup failed");
    }

    #[test]
    fn message_field_is_used_when_error_is_absent() {
        let err = ClientError::from_status(403, r#"{"message": "Cannot delete admin user"}"#);
        assert_eq!(err.user_message("Delete failed"), "Cannot delete admin user");
    }

    #[test]
    fn network_failures_read_generically() {
        let err = ClientError::Network("TypeError: Failed to fetch".into());
        assert_eq!(err.user_message("Login failed"), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn browser_failures_show_their_detail() {
        let err = ClientError::Browser("InvalidStateError: withCredentials".into());
        assert!(!err.is_unauthorized());
        assert_eq!(err.user_message("Upload failed"), "InvalidStateError: withCredentials");
    }
}
