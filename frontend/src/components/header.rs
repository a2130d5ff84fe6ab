use shared::{Page, Role, SessionInfo};
use yew::prelude::*;

use super::auth_button::AuthButton;
use crate::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub client: ApiClient,
    #[prop_or_default]
    pub session: Option<SessionInfo>,
    pub active: Page,
}

const USER_LINKS: [(Page, &str); 3] = [
    (Page::Dashboard, "Dashboard"),
    (Page::Upload, "Upload"),
    (Page::History, "History"),
];

/// Renders the application header
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let links: Vec<(Page, &str)> = match props.session.as_ref().map(SessionInfo::role) {
        Some(Role::Admin) => vec![(Page::AdminDashboard, "Admin")],
        Some(Role::User) => USER_LINKS.to_vec(),
        None => vec![(Page::Login, "Login"), (Page::Signup, "Sign up")],
    };

    html! {
        <header class="app-header">
            <a class="brand" href={Page::Index.href()}>
                <h1><i class="fa-solid fa-shield-halved"></i> {" Deepfake Detector"}</h1>
            </a>
            <nav class="nav-links">
                { for links.into_iter().map(|(page, label)| html! {
                    <a
                        href={page.href()}
                        class={classes!("nav-link", (page == props.active).then_some("active"))}
                    >
                        { label }
                    </a>
                })}
            </nav>
            if let Some(session) = props.session.clone() {
                <AuthButton client={props.client.clone()} {session} />
            }
        </header>
    }
}
