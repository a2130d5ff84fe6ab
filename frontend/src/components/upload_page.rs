use gloo_file::File as GlooFile;
use gloo_file::callbacks::FileReader;
use shared::upload::UploadFlow;
use shared::{Detection, Page, SessionInfo};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

use super::handlers;
use super::header::Header;
use super::preview_area::render_preview_area;
use super::upload_section::render_upload_section;
use super::utils::{render_checking_session, render_dismissible_error};
use crate::api::ApiClient;
use crate::guard;

pub enum Msg {
    SessionChecked(Option<SessionInfo>),

    // File operations
    FilesPicked(Vec<GlooFile>),
    PreviewReady(Uuid, Result<String, String>),
    Clear,

    // Upload operations
    Submit,
    Progress(f64),
    Uploaded(Detection),
    UploadFailed(String),
    DismissError,

    // UI states
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
}

#[derive(Properties, PartialEq)]
pub struct UploadProps {
    pub client: ApiClient,
}

/// Single-file upload page: pick or drop a file, preview it, send it for
/// analysis and continue to the results page.
pub struct UploadView {
    pub(super) session: Option<SessionInfo>,
    pub(super) flow: UploadFlow<GlooFile>,
    pub(super) is_dragging: bool,
    pub(super) preview_reader: Option<FileReader>,
}

impl Component for UploadView {
    type Message = Msg;
    type Properties = UploadProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let session = guard::protect_page(&client, Page::Upload).await;
            link.send_message(Msg::SessionChecked(session));
        });

        Self {
            session: None,
            flow: UploadFlow::new(),
            is_dragging: false,
            preview_reader: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChecked(session) => {
                self.session = session;
                true
            }

            // File operations
            Msg::FilesPicked(files) => handlers::handle_files_picked(self, ctx, files),
            Msg::PreviewReady(token, result) => handlers::handle_preview_ready(self, token, result),
            Msg::Clear => handlers::handle_clear(self),

            // Upload operations
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::Progress(fraction) => {
                self.flow.report_progress(fraction);
                true
            }
            Msg::Uploaded(detection) => handlers::handle_uploaded(self, detection),
            Msg::UploadFailed(message) => {
                log::error!("Upload failed: {}", message);
                self.flow.fail(message);
                true
            }
            Msg::DismissError => {
                self.flow.dismiss_error();
                true
            }

            // UI states
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = self.session.clone() else {
            return render_checking_session();
        };

        html! {
            <div class="container">
                <Header client={ctx.props().client.clone()} session={Some(session)} active={Page::Upload} />

                <main class="main-content">
                { render_upload_section(self, ctx) }
                { render_dismissible_error(self.flow.error(), ctx.link().callback(|_| Msg::DismissError)) }
                { render_preview_area(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"Deepfake Detector | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}
