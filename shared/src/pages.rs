use std::str::FromStr;

use strum_macros::{AsRefStr, EnumIter, EnumString};

use crate::models::Role;

/// Every HTML page of the site. Navigation between them is a full page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
pub enum Page {
    #[strum(serialize = "index.html")]
    Index,
    #[strum(serialize = "login.html")]
    Login,
    #[strum(serialize = "signup.html")]
    Signup,
    #[strum(serialize = "admin-login.html")]
    AdminLogin,
    #[strum(serialize = "dashboard.html")]
    Dashboard,
    #[strum(serialize = "upload.html")]
    Upload,
    #[strum(serialize = "results.html")]
    Results,
    #[strum(serialize = "history.html")]
    History,
    #[strum(serialize = "admin-dashboard.html")]
    AdminDashboard,
}

impl Page {
    /// Resolves a location pathname; the site root is the index page.
    pub fn from_path(path: &str) -> Option<Page> {
        let file = path.rsplit('/').next().unwrap_or_default();
        if file.is_empty() {
            return Some(Page::Index);
        }
        Page::from_str(file).ok()
    }

    pub fn href(self) -> String {
        format!("/{}", self.as_ref())
    }

    /// Where a signed-in user of `role` lands.
    pub fn landing_for(role: Role) -> Page {
        match role {
            Role::Admin => Page::AdminDashboard,
            Role::User => Page::Dashboard,
        }
    }

    /// Where a visitor without a session is sent from a page that requires `role`.
    pub fn login_for(role: Role) -> Page {
        match role {
            Role::Admin => Page::AdminLogin,
            Role::User => Page::Login,
        }
    }

    /// Login and signup forms, which signed-in visitors are sent away from.
    pub fn is_auth_form(self) -> bool {
        matches!(self, Page::Login | Page::Signup | Page::AdminLogin)
    }

    /// Role a page requires, `None` for public pages.
    pub fn required_role(self) -> Option<Role> {
        match self {
            Page::Index | Page::Login | Page::Signup | Page::AdminLogin => None,
            Page::Dashboard | Page::Upload | Page::Results | Page::History => Some(Role::User),
            Page::AdminDashboard => Some(Role::Admin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn resolves_paths() {
        assert_eq!(Page::from_path("/"), Some(Page::Index));
        assert_eq!(Page::from_path(""), Some(Page::Index));
        assert_eq!(Page::from_path("/admin-dashboard.html"), Some(Page::AdminDashboard));
        assert_eq!(Page::from_path("/app/history.html"), Some(Page::History));
        assert_eq!(Page::from_path("/missing.html"), None);
    }

    #[test]
    fn href_round_trips_for_every_page() {
        for page in Page::iter() {
            assert_eq!(Page::from_path(&page.href()), Some(page));
        }
    }

    #[test]
    fn landing_and_login_pages() {
        assert_eq!(Page::landing_for(Role::Admin), Page::AdminDashboard);
        assert_eq!(Page::landing_for(Role::User), Page::Dashboard);
        assert_eq!(Page::login_for(Role::Admin), Page::AdminLogin);
        assert_eq!(Page::login_for(Role::User), Page::Login);
    }

    #[test]
    fn only_admin_dashboard_needs_admin() {
        let admin_only: Vec<Page> = Page::iter()
            .filter(|page| page.required_role() == Some(Role::Admin))
            .collect();
        assert_eq!(admin_only, vec![Page::AdminDashboard]);
    }

    #[test]
    fn auth_forms_are_public() {
        let forms: Vec<Page> = Page::iter().filter(|page| page.is_auth_form()).collect();
        assert_eq!(forms, vec![Page::Login, Page::Signup, Page::AdminLogin]);
        assert!(forms.iter().all(|page| page.required_role().is_none()));
    }
}
