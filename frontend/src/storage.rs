use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use shared::{Detection, Role, SessionInfo, User};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";
const LOGGED_IN_KEY: &str = "isLoggedIn";
const ADMIN_KEY: &str = "isAdmin";
const USER_NAME_KEY: &str = "userName";
const LATEST_DETECTION_KEY: &str = "latestDetection";

const SESSION_KEYS: [&str; 5] = [TOKEN_KEY, USER_KEY, LOGGED_IN_KEY, ADMIN_KEY, USER_NAME_KEY];

/// Session state kept in the browser's local storage. Every tab of the
/// origin sees the same keys; the last write wins.
pub struct SessionStore;

impl SessionStore {
    pub fn token() -> Option<String> {
        LocalStorage::get::<String>(TOKEN_KEY).ok().filter(|token| !token.is_empty())
    }

    /// Persists a successful login. Returns only after every key is written.
    pub fn save_login(token: Option<&str>, user: &User) -> Result<(), StorageError> {
        match token {
            Some(token) => LocalStorage::set(TOKEN_KEY, token)?,
            None => LocalStorage::delete(TOKEN_KEY),
        }
        LocalStorage::set(USER_KEY, user)?;
        LocalStorage::set(LOGGED_IN_KEY, true)?;
        LocalStorage::set(USER_NAME_KEY, &user.name)?;
        if user.is_admin() {
            LocalStorage::set(ADMIN_KEY, true)?;
        } else {
            LocalStorage::delete(ADMIN_KEY);
        }
        Ok(())
    }

    /// Mirrors a confirmed session into the cached flags.
    pub fn remember_session(session: &SessionInfo) {
        let written = LocalStorage::set(LOGGED_IN_KEY, true)
            .and_then(|_| LocalStorage::set(USER_NAME_KEY, session.display_name()))
            .and_then(|_| match session.role() {
                Role::Admin => LocalStorage::set(ADMIN_KEY, true),
                Role::User => {
                    LocalStorage::delete(ADMIN_KEY);
                    Ok(())
                }
            });
        if let Err(err) = written {
            log::warn!("Could not cache session flags: {}", err);
        }
    }

    pub fn clear() {
        for key in SESSION_KEYS {
            LocalStorage::delete(key);
        }
    }

    /// Hands one detection from the upload or history page to the results page.
    pub fn stash_detection(detection: &Detection) -> Result<(), StorageError> {
        LocalStorage::set(LATEST_DETECTION_KEY, detection)
    }

    /// Reads and removes the handed-over detection.
    pub fn take_detection() -> Option<Detection> {
        let detection = LocalStorage::get::<Detection>(LATEST_DETECTION_KEY);
        LocalStorage::delete(LATEST_DETECTION_KEY);
        match detection {
            Ok(detection) => Some(detection),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log::warn!("Discarding unreadable stored detection: {}", err);
                None
            }
        }
    }
}
