//! HTTP client utilities for TurboCommerce storefront pages.
//!
//! Provides a small builder API over a pluggable [`HttpTransport`]. In the
//! browser the transport is [`BrowserTransport`], which goes through
//! `window.fetch` with the page's cookies so the server sees the shopper's
//! session.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use turbo_data::{BrowserTransport, FetchClient, FormFields};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct CartCount {
//!     count: u64,
//! }
//!
//! let client = FetchClient::new(Rc::new(BrowserTransport::new()));
//!
//! let count: CartCount = client.get("/cart/count").send().await?.json()?;
//!
//! let fields = FormFields::new().with("color", "red").with("size", "M");
//! let reply = client.post("/cart/add").form(fields).send().await?;
//! ```

mod error;
mod form;
mod request;
mod response;
mod transport;

#[cfg(target_arch = "wasm32")]
mod browser;

use std::collections::HashMap;
use std::rc::Rc;

pub use error::FetchError;
pub use form::{FileEntry, FormFields, FormValue};
pub use request::{Body, Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::HttpTransport;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTransport;

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Rc<dyn HttpTransport>,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a new HTTP client over `transport`.
    pub fn new(transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            transport: Rc::clone(&self.transport),
            builder,
        }
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    transport: Rc<dyn HttpTransport>,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Set the request body as multipart form data.
    pub fn form(mut self, fields: FormFields) -> Self {
        self.builder = self.builder.form(fields);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.send(self.builder.build()).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, FormFields, HttpTransport, Method, Response};
}
