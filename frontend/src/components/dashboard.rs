use shared::format::format_confidence;
use shared::{Endpoint, Page, SessionInfo, UserStats};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::header::Header;
use super::utils::{render_checking_session, render_error_message};
use crate::api::ApiClient;
use crate::guard;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub client: ApiClient,
}

/// Landing page of a regular user.
#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let session = use_state(|| None::<SessionInfo>);
    let stats = use_state(|| None::<UserStats>);
    let error = use_state(|| None::<String>);

    {
        let session = session.clone();
        let stats = stats.clone();
        let error = error.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let Some(current) = guard::protect_page(&client, Page::Dashboard).await else {
                    return;
                };
                session.set(Some(current));
                match client.get::<UserStats>(&Endpoint::UserStats).await {
                    Ok(loaded) => stats.set(Some(loaded)),
                    Err(err) if guard::expire_session(&err, Page::Dashboard) => {}
                    Err(err) => {
                        log::error!("Failed to load stats: {}", err);
                        error.set(Some(err.user_message("Failed to load statistics")));
                    }
                }
            });
            || ()
        });
    }

    let Some(current) = (*session).clone() else {
        return render_checking_session();
    };

    html! {
        <div class="container">
            <Header client={props.client.clone()} session={Some(current.clone())} active={Page::Dashboard} />
            <main class="main-content">
                <h2>{ format!("Welcome, {}", current.display_name()) }</h2>
                { render_error_message(error.as_deref()) }
                { render_user_stats(stats.as_ref()) }
                <div class="button-container">
                    <a class="analyze-btn" href={Page::Upload.href()}>
                        <i class="fa-solid fa-upload"></i>{" Analyze new media"}
                    </a>
                    <a class="analyze-btn secondary" href={Page::History.href()}>
                        <i class="fa-solid fa-clock-rotate-left"></i>{" View history"}
                    </a>
                </div>
            </main>
        </div>
    }
}

fn render_user_stats(stats: Option<&UserStats>) -> Html {
    let Some(stats) = stats else {
        return html! {};
    };
    let average = stats
        .avg_confidence
        .map(|avg| format!("{}%", format_confidence(avg)))
        .unwrap_or_else(|| "-".to_string());

    html! {
        <div class="stats-grid">
            { stat_card("fa-solid fa-magnifying-glass", "Total analyses", stats.total_detections.to_string()) }
            { stat_card("fa-solid fa-triangle-exclamation", "Deepfakes found", stats.fake_detected.to_string()) }
            { stat_card("fa-solid fa-circle-check", "Authentic", stats.real_detected.to_string()) }
            { stat_card("fa-solid fa-percent", "Average confidence", average) }
        </div>
    }
}

pub fn stat_card(icon: &'static str, label: &'static str, value: String) -> Html {
    html! {
        <div class="stat-card">
            <i class={icon}></i>
            <div class="stat-value">{ value }</div>
            <div class="stat-label">{ label }</div>
        </div>
    }
}
