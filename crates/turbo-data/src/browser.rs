//! `window.fetch` transport for wasm32 builds.

use std::collections::HashMap;

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::{Body, FetchError, FormValue, HttpTransport, Request, Response};

/// Transport backed by the browser's Fetch API.
///
/// Requests carry same-origin credentials so the storefront session
/// cookie reaches the server.
#[derive(Debug, Clone, Default)]
pub struct BrowserTransport;

impl BrowserTransport {
    pub fn new() -> Self {
        Self
    }
}

fn js_error(value: JsValue) -> FetchError {
    FetchError::RequestError(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

fn to_js_body(body: &Body) -> Result<JsValue, FetchError> {
    match body {
        Body::Form(fields) => {
            let form = web_sys::FormData::new().map_err(js_error)?;
            for (name, value) in fields.iter() {
                let appended = match value {
                    FormValue::Text(text) => form.append_with_str(name, text),
                    FormValue::File(entry) => {
                        form.append_with_blob_and_filename(name, entry.file(), entry.file_name())
                    }
                };
                appended.map_err(js_error)?;
            }
            Ok(form.into())
        }
    }
}

#[async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let window = web_sys::window()
            .ok_or_else(|| FetchError::RequestError("no window".to_string()))?;

        let init = web_sys::RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_credentials(web_sys::RequestCredentials::SameOrigin);
        if let Some(body) = &request.body {
            init.set_body(&to_js_body(body)?);
        }

        let js_request = web_sys::Request::new_with_str_and_init(&request.url, &init)
            .map_err(|_| FetchError::InvalidUrl(request.url.clone()))?;
        for (key, value) in &request.headers {
            js_request.headers().set(key, value).map_err(js_error)?;
        }

        let value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(js_error)?;
        let js_response: web_sys::Response = value.dyn_into().map_err(js_error)?;

        let mut headers = HashMap::new();
        if let Ok(Some(content_type)) = js_response.headers().get("content-type") {
            headers.insert("Content-Type".to_string(), content_type);
        }

        let buffer = JsFuture::from(js_response.array_buffer().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(Response::new(js_response.status(), headers, body))
    }
}
