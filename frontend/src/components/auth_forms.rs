use shared::Page;
use shared::forms::{validate_login, validate_signup};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::utils::{render_error_message, render_spinner};
use crate::api::ApiClient;
use crate::auth::{self, LoginKind};
use crate::nav;

#[derive(Properties, PartialEq)]
pub struct AuthFormProps {
    pub client: ApiClient,
}

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub client: ApiClient,
    #[prop_or(LoginKind::User)]
    pub kind: LoginKind,
}

fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

#[derive(Properties, PartialEq)]
pub struct PasswordFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub oninput: Callback<InputEvent>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Password input with a show/hide toggle.
#[function_component(PasswordField)]
pub fn password_field(props: &PasswordFieldProps) -> Html {
    let visible = use_state(|| false);
    let toggle = {
        let visible = visible.clone();
        Callback::from(move |_: MouseEvent| visible.set(!*visible))
    };

    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <div class="password-wrapper">
                <input
                    id={props.id.clone()}
                    type={if *visible { "text" } else { "password" }}
                    value={props.value.clone()}
                    oninput={props.oninput.clone()}
                    disabled={props.disabled}
                    required=true
                />
                <button
                    type="button"
                    class="toggle-password"
                    onclick={toggle}
                    title={if *visible { "Hide password" } else { "Show password" }}
                >
                    <i class={if *visible { "fa-solid fa-eye-slash" } else { "fa-solid fa-eye" }}></i>
                </button>
            </div>
        </div>
    }
}

/// Login form, for regular users or for the admin entrance.
#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let onsubmit = {
        let client = props.client.clone();
        let kind = props.kind;
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let request = match validate_login(&email, &password) {
                Ok(request) => request,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };

            error.set(None);
            submitting.set(true);
            let client = client.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match auth::login(&client, kind, &request).await {
                    Ok(landing) => nav::redirect(landing),
                    Err(message) => {
                        log::warn!("Login rejected: {}", message);
                        error.set(Some(message));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    let (title, icon) = match props.kind {
        LoginKind::User => ("Welcome back", "fa-solid fa-right-to-bracket"),
        LoginKind::Admin => ("Admin login", "fa-solid fa-user-shield"),
    };

    html! {
        <div class="auth-container">
            <form class="auth-form" {onsubmit} novalidate=true>
                <h2><i class={icon}></i>{ format!(" {}", title) }</h2>
                { render_error_message(error.as_deref()) }
                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input
                        id="email"
                        type="email"
                        value={(*email).clone()}
                        oninput={bind_input(&email)}
                        disabled={*submitting}
                        required=true
                    />
                </div>
                <PasswordField
                    id="password"
                    label="Password"
                    value={(*password).clone()}
                    oninput={bind_input(&password)}
                    disabled={*submitting}
                />
                <button type="submit" class="analyze-btn" disabled={*submitting}>
                    if *submitting {
                        { render_spinner("Signing in...") }
                    } else {
                        {"Login"}
                    }
                </button>
                {
                    match props.kind {
                        LoginKind::User => html! {
                            <p class="auth-switch">
                                {"No account yet? "}<a href={Page::Signup.href()}>{"Sign up"}</a>
                                {" · "}<a href={Page::AdminLogin.href()}>{"Admin login"}</a>
                            </p>
                        },
                        LoginKind::Admin => html! {
                            <p class="auth-switch">
                                {"Not an administrator? "}<a href={Page::Login.href()}>{"User login"}</a>
                            </p>
                        },
                    }
                }
            </form>
        </div>
    }
}

#[function_component(AdminLoginForm)]
pub fn admin_login_form(props: &AuthFormProps) -> Html {
    html! { <LoginForm client={props.client.clone()} kind={LoginKind::Admin} /> }
}

#[function_component(SignupForm)]
pub fn signup_form(props: &AuthFormProps) -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let onsubmit = {
        let client = props.client.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let error = error.clone();
        let submitting = submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let request = match validate_signup(&name, &email, &password, &confirm) {
                Ok(request) => request,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };

            error.set(None);
            submitting.set(true);
            let client = client.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match auth::signup(&client, &request).await {
                    Ok(landing) => nav::redirect(landing),
                    Err(message) => {
                        log::warn!("Signup rejected: {}", message);
                        error.set(Some(message));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="auth-container">
            <form class="auth-form" {onsubmit} novalidate=true>
                <h2><i class="fa-solid fa-user-plus"></i>{" Create an account"}</h2>
                { render_error_message(error.as_deref()) }
                <div class="form-group">
                    <label for="name">{"Full name"}</label>
                    <input
                        id="name"
                        type="text"
                        value={(*name).clone()}
                        oninput={bind_input(&name)}
                        disabled={*submitting}
                        required=true
                    />
                </div>
                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input
                        id="email"
                        type="email"
                        value={(*email).clone()}
                        oninput={bind_input(&email)}
                        disabled={*submitting}
                        required=true
                    />
                </div>
                <PasswordField
                    id="password"
                    label="Password"
                    value={(*password).clone()}
                    oninput={bind_input(&password)}
                    disabled={*submitting}
                />
                <PasswordField
                    id="confirm-password"
                    label="Confirm password"
                    value={(*confirm).clone()}
                    oninput={bind_input(&confirm)}
                    disabled={*submitting}
                />
                <button type="submit" class="analyze-btn" disabled={*submitting}>
                    if *submitting {
                        { render_spinner("Creating account...") }
                    } else {
                        {"Sign up"}
                    }
                </button>
                <p class="auth-switch">
                    {"Already registered? "}<a href={Page::Login.href()}>{"Log in"}</a>
                </p>
            </form>
        </div>
    }
}
