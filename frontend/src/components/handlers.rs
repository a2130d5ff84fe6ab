use gloo_file::File as GlooFile;
use gloo_file::callbacks::read_as_data_url;
use shared::{Detection, Endpoint, FileKind, Page, UploadResponse};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, FileList};
use yew::prelude::*;

use super::upload_page::{Msg, UploadView};
use crate::nav;
use crate::storage::SessionStore;

/// Only the first file is considered; the rest of a multi-file pick or
/// drop is ignored.
pub fn handle_files_picked(model: &mut UploadView, ctx: &Context<UploadView>, files: Vec<GlooFile>) -> bool {
    let Some(file) = files.into_iter().next() else {
        return false;
    };

    let token = match model.flow.select(file.clone(), &file.name(), &file.raw_mime_type(), file.size()) {
        Ok(token) => token,
        Err(err) => {
            log::warn!("Rejected file {}: {}", file.name(), err);
            return true;
        }
    };

    log::info!("Selected {} ({} bytes)", file.name(), file.size());
    let link = ctx.link().clone();
    let reader = read_as_data_url(&file, move |result| {
        link.send_message(Msg::PreviewReady(token, result.map_err(|err| err.to_string())));
    });
    model.preview_reader = Some(reader);
    true
}

pub fn handle_preview_ready(model: &mut UploadView, token: Uuid, result: Result<String, String>) -> bool {
    model.preview_reader = None;
    match result {
        Ok(data_url) => model.flow.attach_preview(token, data_url),
        Err(err) => {
            log::warn!("Preview could not be read: {}", err);
            false
        }
    }
}

pub fn handle_clear(model: &mut UploadView) -> bool {
    model.preview_reader = None;
    model.flow.clear();
    true
}

pub fn handle_submit(model: &mut UploadView, ctx: &Context<UploadView>) -> bool {
    let selected = match model.flow.begin_upload() {
        Ok(selected) => selected,
        Err(err) => {
            log::warn!("Upload not started: {}", err);
            return true;
        }
    };

    send_upload_request(ctx, selected.handle, selected.name, selected.kind);
    true
}

pub fn handle_uploaded(model: &mut UploadView, detection: Detection) -> bool {
    if let Err(err) = SessionStore::stash_detection(&detection) {
        model.flow.fail(format!("Could not keep the result: {}", err));
        return true;
    }
    log::info!("Detection {} stored, opening results", detection.id);
    model.flow.finish(detection);
    nav::redirect(Page::Results);
    true
}

pub fn handle_drop(model: &mut UploadView, ctx: &Context<UploadView>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn process_file_list(ctx: &Context<UploadView>, file_list: FileList) {
    if let Some(file) = file_list.item(0) {
        ctx.link().send_message(Msg::FilesPicked(vec![GlooFile::from(file)]));
    }
}

fn upload_outcome(response: UploadResponse, name: &str, kind: FileKind) -> Msg {
    match response.into_detection(name, kind) {
        Ok(detection) => Msg::Uploaded(detection),
        Err(message) => Msg::UploadFailed(message),
    }
}

pub fn send_upload_request(ctx: &Context<UploadView>, file: GlooFile, name: String, kind: FileKind) {
    let client = ctx.props().client.clone();

    spawn_local({
        let link = ctx.link().clone();

        async move {
            let on_progress = link.callback(Msg::Progress);
            let endpoint = Endpoint::Upload(kind);
            match client.upload_file::<UploadResponse>(&endpoint, &file, on_progress).await {
                Ok(response) => link.send_message(upload_outcome(response, &name, kind)),
                Err(err) => link.send_message(Msg::UploadFailed(err.user_message("Upload failed"))),
            }
        }
    });
}
