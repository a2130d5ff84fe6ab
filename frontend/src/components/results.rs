use shared::format::{bar_width, format_confidence, format_processing_time};
use shared::{Detection, DetectionMetadata, Page, SessionInfo, Verdict};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::header::Header;
use super::utils::{format_date_time, render_checking_session};
use crate::api::ApiClient;
use crate::storage::SessionStore;
use crate::{guard, nav};

#[derive(Properties, PartialEq)]
pub struct ResultsProps {
    pub client: ApiClient,
}

/// Shows the detection handed over by the upload or history page.
#[function_component(ResultsView)]
pub fn results_view(props: &ResultsProps) -> Html {
    let loaded = use_state(|| None::<(SessionInfo, Detection)>);

    {
        let loaded = loaded.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let Some(session) = guard::protect_page(&client, Page::Results).await else {
                    return;
                };
                match SessionStore::take_detection() {
                    Some(detection) => loaded.set(Some((session, detection))),
                    None => {
                        log::info!("No detection to show");
                        nav::redirect(Page::Upload);
                    }
                }
            });
            || ()
        });
    }

    let Some((session, detection)) = (*loaded).clone() else {
        return render_checking_session();
    };

    html! {
        <div class="container">
            <Header client={props.client.clone()} session={Some(session)} active={Page::Results} />
            <main class="main-content">
                { render_results(&detection) }
                <div class="button-container">
                    <a class="analyze-btn" href={Page::Upload.href()}>
                        <i class="fa-solid fa-upload"></i>{" Analyze another file"}
                    </a>
                    <a class="analyze-btn secondary" href={Page::History.href()}>
                        <i class="fa-solid fa-clock-rotate-left"></i>{" View history"}
                    </a>
                </div>
            </main>
        </div>
    }
}

pub fn render_results(detection: &Detection) -> Html {
    let is_fake = detection.is_fake();
    let confidence = detection.confidence;
    let (icon, summary) = match detection.prediction {
        Verdict::Fake => ("fa-solid fa-triangle-exclamation", "This file appears to be AI-generated or manipulated"),
        Verdict::Real => ("fa-solid fa-circle-check", "This file appears to be genuine and unmanipulated"),
        Verdict::Unknown => ("fa-solid fa-circle-question", "The analysis did not reach a verdict"),
    };

    html! {
        <div class={classes!("results-container", if is_fake { "ai-detected" } else { "not-ai" })}>
            <div class="result-header">
                <div class={classes!("prediction-badge", if is_fake { "fake" } else { "real" })}>
                    <i class={icon}></i>
                    <h2>{ detection.prediction.headline() }</h2>
                    <p>{ summary }</p>
                </div>
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence:"}</div>
                    <div class="meter">
                        <div
                            class={classes!("meter-fill", if is_fake { "red" } else { "green" })}
                            style={bar_width(confidence)}
                        ></div>
                    </div>
                    <div class="meter-value">{ format!("{}%", format_confidence(confidence)) }</div>
                </div>
            </div>
            <div class="detailed-results">
                <h3>{"File details"}</h3>
                <dl class="detail-list">
                    <dt>{"File name"}</dt><dd>{ &detection.file_name }</dd>
                    <dt>{"Type"}</dt><dd>{ detection.file_type.as_ref().to_uppercase() }</dd>
                    <dt>{"Processing time"}</dt><dd>{ format_processing_time(detection.processing_time) }</dd>
                    <dt>{"Analyzed"}</dt><dd>{ format_date_time(detection.created_at.as_deref()) }</dd>
                </dl>
            </div>
            { render_explanation(detection.prediction, confidence) }
            { detection.metadata().map(|metadata| render_metadata(&metadata)).unwrap_or_default() }
        </div>
    }
}

fn render_explanation(verdict: Verdict, confidence: f64) -> Html {
    let confidence = format_confidence(confidence);
    match verdict {
        Verdict::Fake => html! {
            <div class="info-box warning">
                <h4>{"⚠️ Deepfake Indicators Detected"}</h4>
                <p>
                    {"Our model found patterns consistent with AI-generated or manipulated content. "}
                    { format!("With {}% confidence, this media shows signs of forgery.", confidence) }
                </p>
                <ul>
                    <li>{"Facial artifacts or inconsistencies may be present"}</li>
                    <li>{"Temporal anomalies detected in video frames"}</li>
                    <li>{"Compression patterns suggest manipulation"}</li>
                </ul>
                <p>
                    <strong>{"Recommendation: "}</strong>
                    {"Be careful when sharing or trusting this content. Verify the source and cross-check it with other reliable sources."}
                </p>
            </div>
        },
        Verdict::Real => html! {
            <div class="info-box success">
                <h4>{"✓ Authentic Media Detected"}</h4>
                <p>{ format!("Our analysis indicates this media is {}% likely to be genuine and unmanipulated.", confidence) }</p>
                <ul>
                    <li>{"No significant forgery artifacts detected"}</li>
                    <li>{"Natural compression patterns observed"}</li>
                    <li>{"Temporal consistency maintained throughout"}</li>
                </ul>
                <p>
                    <strong>{"Note: "}</strong>
                    {"No detection system is 100% accurate. Always verify important content from multiple sources."}
                </p>
            </div>
        },
        Verdict::Unknown => html! {
            <div class="info-box">
                <h4>{"Inconclusive"}</h4>
                <p>{"The backend returned a result this page does not recognise."}</p>
            </div>
        },
    }
}

fn render_metadata(metadata: &DetectionMetadata) -> Html {
    html! {
        <div class="detailed-results metadata">
            <h3>{"Analysis metadata"}</h3>
            <dl class="detail-list">
                if let Some(method) = &metadata.detection_method {
                    <dt>{"Detection method"}</dt><dd>{ method }</dd>
                }
                if let Some(version) = &metadata.model_version {
                    <dt>{"Model version"}</dt><dd>{ version }</dd>
                }
                { for metadata.file_info.iter().flatten().map(|(key, value)| {
                    let shown = match value.as_str() {
                        Some(text) => text.to_string(),
                        None => value.to_string(),
                    };
                    html! { <><dt>{ key }</dt><dd>{ shown }</dd></> }
                })}
            </dl>
        </div>
    }
}
