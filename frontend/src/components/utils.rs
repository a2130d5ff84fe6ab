use gloo_timers::callback::Timeout;
use js_sys::Date;
use shared::format::{bar_width, format_confidence};
use shared::{FileKind, Role, Verdict};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

pub fn render_error_message(error: Option<&str>) -> Html {
    if let Some(error_msg) = error {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}

/// Error banner with a close button.
pub fn render_dismissible_error(error: Option<&str>, ondismiss: Callback<MouseEvent>) -> Html {
    let Some(error_msg) = error else {
        return html! {};
    };
    html! {
        <div class="error-message">
            <i class="fa-solid fa-circle-exclamation"></i>
            <p>{ error_msg }</p>
            <button type="button" class="dismiss-btn" title="Dismiss" onclick={ondismiss}>
                <i class="fa-solid fa-xmark"></i>
            </button>
        </div>
    }
}

/// Placeholder shown while the session guard is still running.
pub fn render_checking_session() -> Html {
    html! {
        <div class="loading-preview">
            <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
            <p style="margin-left: 10px;">{"Checking session..."}</p>
        </div>
    }
}

pub fn render_spinner(label: &str) -> Html {
    html! { <><i class="fa-solid fa-spinner fa-spin"></i>{ format!(" {}", label) }</> }
}

/// Renders a backend timestamp in the browser's locale.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let date = Date::new(&JsValue::from_str(raw));
            if date.get_time().is_nan() {
                raw.to_string()
            } else {
                String::from(date.to_locale_date_string("default", &JsValue::UNDEFINED))
            }
        }
        None => "-".to_string(),
    }
}

pub fn format_date_time(raw: Option<&str>) -> String {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let date = Date::new(&JsValue::from_str(raw));
            if date.get_time().is_nan() {
                raw.to_string()
            } else {
                String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
            }
        }
        None => "-".to_string(),
    }
}

pub fn render_verdict_badge(verdict: Verdict) -> Html {
    html! {
        <span class={classes!("result-badge", verdict.as_ref().to_string())}>
            { verdict.badge_text() }
        </span>
    }
}

pub fn render_role_badge(role: Role) -> Html {
    html! {
        <span class={classes!("role-badge", role.as_ref().to_string())}>
            { if role == Role::Admin { "👑 Admin" } else { "User" } }
        </span>
    }
}

pub fn render_kind_cell(kind: FileKind) -> Html {
    html! { <span class="file-kind"><i class={kind.icon()}></i>{ format!(" {}", kind) }</span> }
}

/// Mini confidence bar used in the tables.
pub fn render_confidence_cell(confidence: f64, verdict: Verdict) -> Html {
    html! {
        <div class="confidence-cell">
            <div class="mini-bar">
                <div class={classes!("mini-fill", verdict.as_ref().to_string())} style={bar_width(confidence)}></div>
            </div>
            <span>{ format!("{}%", format_confidence(confidence)) }</span>
        </div>
    }
}
