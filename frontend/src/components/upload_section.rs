use super::upload_page::{Msg, UploadView};
use super::utils::debounce;
use gloo_file::File as GlooFile;
use shared::upload::accept_attribute;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &UploadView, ctx: &Context<UploadView>) -> Html {
    html! {
        <div class="upload-section">
            <h2>{"Analyze media"}</h2>
            { render_file_input_area(model, ctx) }
        </div>
    }
}

fn render_file_input_area(model: &UploadView, ctx: &Context<UploadView>) -> Html {
    let uploading = model.flow.is_uploading();
    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let first = input.files().and_then(|files| files.item(0)).map(GlooFile::from);

        input.set_value("");

        first.map(|file| Msg::FilesPicked(vec![file]))
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(input) = input {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept={accept_attribute()}
                style="display: none;"
                onchange={handle_change}
                disabled={uploading}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || {
                        if !uploading {
                            trigger_file_input.emit(())
                        }
                    }
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop an image or video here, or click to browse"}</p>
                    <p class="file-types">{"Images: PNG, JPG, GIF, BMP · Videos: MP4, AVI, MOV, MKV, FLV, WMV · Max 100MB"}</p>
                </div>
            </div>
        </>
    }
}
