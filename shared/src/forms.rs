use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::endpoints::AuthMode;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Invalid email format")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// JSON body for `auth/signup`; the token backend names the field `full_name`.
    pub fn body(&self, mode: AuthMode) -> Value {
        let name_key = match mode {
            AuthMode::Cookie => "name",
            AuthMode::Bearer => "full_name",
        };
        json!({
            name_key: self.name,
            "email": self.email,
            "password": self.password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}

/// Validates the signup form in the order the fields are checked on screen.
pub fn validate_signup(name: &str, email: &str, password: &str, confirm: &str) -> Result<SignupRequest, FormError> {
    let name = name.trim();
    let email = normalize_email(email);
    if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(FormError::MissingFields);
    }
    if password != confirm {
        return Err(FormError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort);
    }
    if !looks_like_email(&email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(SignupRequest {
        name: name.to_string(),
        email,
        password: password.to_string(),
    })
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, FormError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(FormError::MissingCredentials);
    }
    Ok(LoginRequest {
        email,
        password: password.to_string(),
    })
}
