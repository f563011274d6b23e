//! Axum framework adapters for the portal's HTTP traits.
//!
//! This module implements `PortalRequest` and `PortalResponseBuilder` for Axum's types
//! using newtype wrappers to avoid the orphan rule.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  portal_core::PortalRequest (trait)        │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest(Request<()>)                  │
//! │  impl PortalRequest for AxumRequest { }    │
//! └────────────────────────────────────────────┘
//! ```
//!
//! Routes extract the request head only: bodies are decoded by Axum's own
//! extractors before the framework-agnostic handler runs.

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use portal_core::{PortalRequest, PortalResponseBuilder};

/// Newtype wrapper around the head of an Axum request.
#[repr(transparent)]
pub struct AxumRequest(pub Request<()>);

impl AxumRequest {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        let mut request = Request::new(());
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        *request.headers_mut() = headers;
        Self(request)
    }
}

impl From<Request<()>> for AxumRequest {
    fn from(req: Request<()>) -> Self {
        AxumRequest(req)
    }
}

impl PortalRequest for AxumRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers().get(name)?.to_str().ok()
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        // HTTP/2 clients may split cookies over several headers
        self.0
            .headers()
            .get_all("cookie")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    fn method(&self) -> &str {
        self.0.method().as_str()
    }

    fn path(&self) -> &str {
        self.0.uri().path()
    }
}

/// Newtype wrapper around Axum's response builder.
pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    /// Create a new Axum response builder
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn html_body(mut self, body: String) -> Self {
        self.builder = self
            .builder
            .header("content-type", "text/html; charset=utf-8");
        self.body = Some(body);
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        self.builder
            .body(Body::from(body))
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "invalid response parts");
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                response
            })
    }
}

/// Helper function to create an Axum response builder
pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}
