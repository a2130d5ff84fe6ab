use shared::{Page, SessionInfo};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::header::Header;
use crate::api::ApiClient;
use crate::guard;

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub client: ApiClient,
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let session = use_state(|| None::<SessionInfo>);

    {
        let session = session.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                session.set(guard::check_session(&client).await);
            });
            || ()
        });
    }

    let cta = match session.as_ref() {
        Some(current) => html! {
            <a class="analyze-btn" href={Page::landing_for(current.role()).href()}>
                <i class="fa-solid fa-gauge"></i>{" Go to dashboard"}
            </a>
        },
        None => html! {
            <>
                <a class="analyze-btn" href={Page::Signup.href()}>
                    <i class="fa-solid fa-user-plus"></i>{" Get started"}
                </a>
                <a class="analyze-btn secondary" href={Page::Login.href()}>
                    <i class="fa-solid fa-right-to-bracket"></i>{" Login"}
                </a>
            </>
        },
    };

    html! {
        <div class="container">
            <Header client={props.client.clone()} session={(*session).clone()} active={Page::Index} />
            <main class="main-content hero">
                <h2>{"Spot manipulated media before it spreads"}</h2>
                <p class="subtitle">
                    {"Upload an image or a video and get a deepfake verdict with a confidence score."}
                </p>
                <div class="button-container">{ cta }</div>
                <section class="features">
                    <div class="feature-card">
                        <i class="fa-solid fa-image"></i>
                        <h3>{"Images"}</h3>
                        <p>{"PNG, JPEG, GIF and BMP"}</p>
                    </div>
                    <div class="feature-card">
                        <i class="fa-solid fa-video"></i>
                        <h3>{"Videos"}</h3>
                        <p>{"MP4, AVI, MOV, MKV, FLV and WMV up to 100MB"}</p>
                    </div>
                    <div class="feature-card">
                        <i class="fa-solid fa-clock-rotate-left"></i>
                        <h3>{"History"}</h3>
                        <p>{"Every analysis is kept with your account"}</p>
                    </div>
                </section>
            </main>
            <footer class="app-footer">
                <p>{"Deepfake Detector | Fullstack Rust WASM"}</p>
            </footer>
        </div>
    }
}
