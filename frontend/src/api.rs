use gloo_events::EventListener;
use gloo_file::File as GlooFile;
use gloo_net::http::{Method, RequestBuilder, Response};
use js_sys::{Function, Promise};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{AuthMode, Endpoint};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, ProgressEvent, RequestCredentials, XmlHttpRequest};
use yew::Callback;

use crate::config::AppConfig;
use crate::error::ClientError;
use crate::storage::SessionStore;

/// HTTP client for the detection backend.
///
/// One client serves both backend dialects: in cookie mode every request
/// carries credentials, in bearer mode the stored token is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    mode: AuthMode,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            mode: config.auth_mode,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        endpoint.url(&self.base_url, self.mode)
    }

    fn bearer_header(&self) -> Option<String> {
        match self.mode {
            AuthMode::Bearer => SessionStore::token().map(|token| format!("Bearer {}", token)),
            AuthMode::Cookie => None,
        }
    }

    fn prepare(&self, method: Method, endpoint: &Endpoint) -> RequestBuilder {
        let url = self.url(endpoint);
        log::debug!("{} {}", method, url);
        let builder = RequestBuilder::new(&url)
            .method(method)
            .credentials(RequestCredentials::Include)
            .header("Accept", "application/json");
        match self.bearer_header() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ClientError> {
        let request = self.prepare(Method::GET, endpoint).build()?;
        Self::dispatch(request.send().await?).await
    }

    pub async fn send_json<B, T>(&self, method: Method, endpoint: &Endpoint, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self.prepare(method, endpoint).json(body)?;
        Self::dispatch(request.send().await?).await
    }

    pub async fn send_empty<T: DeserializeOwned>(&self, method: Method, endpoint: &Endpoint) -> Result<T, ClientError> {
        let request = self.prepare(method, endpoint).build()?;
        Self::dispatch(request.send().await?).await
    }

    async fn dispatch<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        decode_response(status, response.ok(), &body)
    }

    /// Uploads `file` as multipart field `file`.
    ///
    /// Goes through `XMLHttpRequest` since fetch has no upload progress;
    /// `on_progress` receives the sent fraction in `0.0..=1.0`.
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        file: &GlooFile,
        on_progress: Callback<f64>,
    ) -> Result<T, ClientError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", file.as_ref(), &file.name())
            .map_err(js_error)?;

        let xhr = XmlHttpRequest::new().map_err(js_error)?;
        xhr.open("POST", &self.url(endpoint)).map_err(js_error)?;
        xhr.set_with_credentials(true);
        if let Some(value) = self.bearer_header() {
            xhr.set_request_header("Authorization", &value).map_err(js_error)?;
        }
        let upload = xhr.upload().map_err(js_error)?;

        let mut settle: Option<(Function, Function)> = None;
        let finished = Promise::new(&mut |resolve, reject| settle = Some((resolve, reject)));
        let (resolve, reject) = settle.ok_or_else(|| ClientError::Browser("Upload could not start".into()))?;

        let _progress = EventListener::new(&upload, "progress", move |event| {
            if let Some(event) = event.dyn_ref::<ProgressEvent>() {
                if event.length_computable() && event.total() > 0.0 {
                    on_progress.emit(event.loaded() / event.total());
                }
            }
        });
        let _load = EventListener::new(&xhr, "load", move |_| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let _error = {
            let reject = reject.clone();
            EventListener::new(&xhr, "error", move |_| {
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("connection failed"));
            })
        };
        let _abort = EventListener::new(&xhr, "abort", move |_| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("upload aborted"));
        });

        xhr.send_with_opt_form_data(Some(&form)).map_err(js_error)?;
        JsFuture::from(finished)
            .await
            .map_err(|err| ClientError::Network(describe(&err)))?;

        let status = xhr.status().map_err(js_error)?;
        let body = xhr.response_text().map_err(js_error)?.unwrap_or_default();
        decode_response(status, (200..300).contains(&status), &body)
    }
}

/// Turns a status and raw body into the typed payload or a normalized error.
pub fn decode_response<T: DeserializeOwned>(status: u16, ok: bool, body: &str) -> Result<T, ClientError> {
    if !ok {
        let err = ClientError::from_status(status, body);
        log::error!("Request failed with status {}: {}", status, err);
        return Err(err);
    }
    serde_json::from_str(body).map_err(ClientError::from)
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn js_error(value: JsValue) -> ClientError {
    ClientError::Browser(describe(&value))
}
