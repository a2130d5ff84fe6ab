use strum_macros::{AsRefStr, Display, EnumString};

use crate::models::{DetectionId, FileKind, UserId};

/// Page size the admin tables ask for.
pub const ADMIN_PAGE_SIZE: u32 = 100;

/// How the backend identifies the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AuthMode {
    /// Session cookie set by the backend; requests carry credentials.
    #[default]
    Cookie,
    /// Token returned at login, sent as `Authorization: Bearer`.
    Bearer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Signup,
    Login,
    AdminLogin,
    Logout,
    Session,
    Upload(FileKind),
    History { page: u32, per_page: u32 },
    HistoryBatch { limit: u32 },
    DetectionDetail(DetectionId),
    UserStats,
    AdminUsers,
    AdminUser(UserId),
    ToggleRole(UserId),
    AdminDetections,
    AdminDetection(DetectionId),
    AdminStats,
}

impl Endpoint {
    /// Path relative to the API base URL for the given backend dialect.
    pub fn path(&self, mode: AuthMode) -> String {
        match (self, mode) {
            (Endpoint::Signup, _) => "auth/signup".into(),
            (Endpoint::Login, _) => "auth/login".into(),
            (Endpoint::AdminLogin, AuthMode::Cookie) => "auth/admin-login".into(),
            (Endpoint::AdminLogin, AuthMode::Bearer) => "auth/login".into(),
            (Endpoint::Logout, _) => "auth/logout".into(),
            (Endpoint::Session, AuthMode::Cookie) => "auth/check-session".into(),
            (Endpoint::Session, AuthMode::Bearer) => "auth/me".into(),
            (Endpoint::Upload(_), AuthMode::Cookie) => "detection/upload".into(),
            (Endpoint::Upload(kind), AuthMode::Bearer) => format!("detection/upload-{}", kind),
            (Endpoint::History { page, per_page }, _) => {
                format!("detection/history?page={}&per_page={}", page, per_page)
            }
            (Endpoint::HistoryBatch { limit }, _) => {
                format!("detection/history?page=1&per_page={limit}&limit={limit}")
            }
            (Endpoint::DetectionDetail(id), AuthMode::Cookie) => format!("detection/history/{}", id),
            (Endpoint::DetectionDetail(id), AuthMode::Bearer) => format!("detection/detection/{}", id),
            (Endpoint::UserStats, _) => "detection/stats".into(),
            (Endpoint::AdminUsers, _) => format!("admin/users?page=1&per_page={}", ADMIN_PAGE_SIZE),
            (Endpoint::AdminUser(id), _) => format!("admin/users/{}", id),
            (Endpoint::ToggleRole(id), _) => format!("admin/users/{}/toggle-role", id),
            (Endpoint::AdminDetections, _) => format!("admin/detections?page=1&per_page={}", ADMIN_PAGE_SIZE),
            (Endpoint::AdminDetection(id), _) => format!("admin/detections/{}", id),
            (Endpoint::AdminStats, AuthMode::Cookie) => "admin/stats".into(),
            (Endpoint::AdminStats, AuthMode::Bearer) => "admin/dashboard-stats".into(),
        }
    }

    pub fn url(&self, base: &str, mode: AuthMode) -> String {
        join_url(base, &self.path(mode))
    }
}

pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_specific_paths() {
        let cases = [
            (Endpoint::Session, "auth/check-session", "auth/me"),
            (Endpoint::Upload(FileKind::Image), "detection/upload", "detection/upload-image"),
            (Endpoint::Upload(FileKind::Video), "detection/upload", "detection/upload-video"),
            (
                Endpoint::DetectionDetail(DetectionId(9)),
                "detection/history/9",
                "detection/detection/9",
            ),
            (Endpoint::AdminStats, "admin/stats", "admin/dashboard-stats"),
            (Endpoint::AdminLogin, "auth/admin-login", "auth/login"),
        ];
        for (endpoint, cookie, bearer) in cases {
            assert_eq!(endpoint.path(AuthMode::Cookie), cookie);
            assert_eq!(endpoint.path(AuthMode::Bearer), bearer);
        }
    }

    #[test]
    fn shared_paths() {
        for mode in [AuthMode::Cookie, AuthMode::Bearer] {
            assert_eq!(Endpoint::ToggleRole(UserId(3)).path(mode), "admin/users/3/toggle-role");
            assert_eq!(Endpoint::AdminDetection(DetectionId(4)).path(mode), "admin/detections/4");
            assert_eq!(
                Endpoint::History { page: 2, per_page: 20 }.path(mode),
                "detection/history?page=2&per_page=20"
            );
        }
    }

    #[test]
    fn urls_join_without_double_slashes() {
        assert_eq!(
            Endpoint::Login.url("http://localhost:5000/api/", AuthMode::Cookie),
            "http://localhost:5000/api/auth/login"
        );
        assert_eq!(join_url("/api", "auth/me"), "/api/auth/me");
    }

    #[test]
    fn auth_mode_parses() {
        assert_eq!("bearer".parse::<AuthMode>(), Ok(AuthMode::Bearer));
        assert_eq!(AuthMode::default(), AuthMode::Cookie);
        assert!("jwt".parse::<AuthMode>().is_err());
    }
}
