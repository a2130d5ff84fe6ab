use super::upload_page::{Msg, UploadView};
use super::utils::{debounce, render_spinner};
use gloo_file::File as GlooFile;
use shared::FileKind;
use shared::format::{bar_width, format_file_size, truncate_name};
use shared::upload::SelectedFile;
use yew::prelude::*;

pub fn render_preview_area(model: &UploadView, ctx: &Context<UploadView>) -> Html {
    let Some(selected) = model.flow.selected() else {
        return html! {};
    };

    let link = ctx.link().clone();
    let uploading = model.flow.is_uploading();

    html! {
        <div id="preview-container">
            { render_selected_preview(selected) }
            <div class="file-info">
                <i class={selected.kind.icon()}></i>
                <span class="file-name" title={selected.name.clone()}>{ truncate_name(&selected.name, 40) }</span>
                <span class="file-size">{ format_file_size(selected.size) }</span>
            </div>
            { render_progress(model.flow.progress()) }
            <div class="button-container">
                <button
                    id="clear-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    disabled={uploading}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Clear)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
                <button
                    class="analyze-btn"
                    disabled={!model.flow.can_submit()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                >
                    { render_analyze_button_content(model, selected) }
                </button>
            </div>
        </div>
    }
}

fn render_selected_preview(selected: &SelectedFile<GlooFile>) -> Html {
    match (&selected.preview, selected.kind) {
        (None, _) => html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p style="margin-left: 10px;">{"Loading preview..."}</p>
            </div>
        },
        (Some(url), FileKind::Image) => html! {
            <img id="actual-image-preview" src={url.clone()} alt={selected.name.clone()} />
        },
        (Some(url), FileKind::Video) => html! {
            <video id="actual-video-preview" src={url.clone()} controls=true />
        },
    }
}

fn render_progress(progress: Option<u8>) -> Html {
    match progress {
        Some(percent) => html! {
            <div class="upload-progress">
                <div class="meter">
                    <div class="meter-fill" style={bar_width(f64::from(percent))}></div>
                </div>
                <div class="meter-value">{ format!("{}%", percent) }</div>
            </div>
        },
        None => html! {},
    }
}

fn render_analyze_button_content(model: &UploadView, selected: &SelectedFile<GlooFile>) -> Html {
    if model.flow.is_uploading() {
        render_spinner("Analyzing...")
    } else {
        let display_name = truncate_name(&selected.name, 20);
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{ format!(" Analyze \"{}\"", display_name) }</> }
    }
}
