use shared::SessionInfo;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::auth;

#[derive(Properties, PartialEq)]
pub struct AuthButtonProps {
    pub client: ApiClient,
    pub session: SessionInfo,
}

/// User badge with the logout action.
#[function_component(AuthButton)]
pub fn auth_button(props: &AuthButtonProps) -> Html {
    let logging_out = use_state(|| false);

    let handle_logout = {
        let client = props.client.clone();
        let logging_out = logging_out.clone();
        Callback::from(move |_: MouseEvent| {
            if *logging_out {
                return;
            }
            logging_out.set(true);
            let client = client.clone();
            spawn_local(async move {
                auth::logout(&client).await;
            });
        })
    };

    html! {
        <div class="auth-button-container">
            <div class="user-info">
                <div class="user-details">
                    <span class="user-name">{ props.session.display_name() }</span>
                </div>
                <button
                    class="logout-button"
                    onclick={handle_logout}
                    disabled={*logging_out}
                    title="Logout"
                >
                    if *logging_out {
                        <i class="fa-solid fa-spinner fa-spin"></i>
                    } else {
                        <i class="fa-solid fa-sign-out-alt"></i>
                    }
                    {" Logout"}
                </button>
            </div>
        </div>
    }
}
