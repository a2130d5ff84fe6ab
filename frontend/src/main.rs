mod api;
mod auth;
mod components;
mod config;
mod error;
mod guard;
mod nav;
mod storage;

use shared::Page;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use api::ApiClient;
use components::admin::AdminDashboard;
use components::auth_forms::{AdminLoginForm, LoginForm, SignupForm};
use components::dashboard::Dashboard;
use components::history::HistoryView;
use components::landing::Landing;
use components::results::ResultsView;
use components::upload_page::UploadView;
use config::AppConfig;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

/// Every HTML page loads the same bundle; the location decides what renders.
#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let client = ApiClient::new(&props.config);
    let page = nav::current_page().unwrap_or_else(|| {
        gloo_console::warn!("Unknown page, showing the landing page");
        Page::Index
    });
    log::info!("Rendering {}", page.as_ref());

    // Visitors who already have a session never see the auth forms.
    {
        let client = client.clone();
        use_effect_with(page, move |page| {
            if page.is_auth_form() {
                spawn_local(async move {
                    guard::prevent_auth_page_access(&client).await;
                });
            }
            || ()
        });
    }

    match page {
        Page::Index => html! { <Landing {client} /> },
        Page::Login => html! { <LoginForm {client} /> },
        Page::Signup => html! { <SignupForm {client} /> },
        Page::AdminLogin => html! { <AdminLoginForm {client} /> },
        Page::Dashboard => html! { <Dashboard {client} /> },
        Page::Upload => html! { <UploadView {client} /> },
        Page::Results => html! { <ResultsView {client} /> },
        Page::History => html! { <HistoryView {client} paging={props.config.history_paging} /> },
        Page::AdminDashboard => html! { <AdminDashboard {client} /> },
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    let config = AppConfig::from_env();
    log::info!("App starting against {} ({} auth)", config.api_base_url, config.auth_mode);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
