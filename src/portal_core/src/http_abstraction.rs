//! Zero-cost HTTP abstraction traits for the portal screens.
//!
//! This module defines trait-based HTTP abstractions that frameworks implement directly
//! on their own types (via newtype wrappers), so the screen handlers never depend on a
//! specific web framework.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  portal_core: Defines HTTP traits        │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  portal_axum: Newtype wrappers           │
//! │  struct AxumRequest(axum::Request)       │
//! │  impl PortalRequest for AxumRequest { }  │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  Screen handlers use PortalRequest and   │
//! │  PortalResponseBuilder (generic)         │
//! └──────────────────────────────────────────┘
//! ```

/// Trait for HTTP requests the portal handlers read from.
///
/// Only headers and cookies are needed: form bodies are decoded by the framework
/// before a handler runs.
pub trait PortalRequest {
    /// Get a header value by name.
    ///
    /// Header lookup should be case-insensitive (RFC 9110).
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get a cookie value by name.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// Get the request path
    fn path(&self) -> &str;
}

/// Trait for building HTTP responses for the portal screens.
///
/// This follows the builder pattern, allowing method chaining:
/// ```ignore
/// builder
///     .status(200)
///     .cookie("portal_session=token; HttpOnly; Secure")
///     .html_body(page)
///     .build()
/// ```
pub trait PortalResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Add a Set-Cookie header
    ///
    /// The cookie_value should be a complete cookie string like:
    /// `"portal_session=token; HttpOnly; Secure; SameSite=Lax; Path=/"`
    fn cookie(self, cookie_value: &str) -> Self {
        self.header("set-cookie", cookie_value)
    }

    /// Set an HTML body with the matching Content-Type header
    fn html_body(self, body: String) -> Self;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// Helper methods for the responses every screen produces.
///
/// Automatically implemented for all types that implement `PortalResponseBuilder`.
pub trait PortalResponseHelpers: PortalResponseBuilder {
    /// Create a 200 OK page
    fn ok_html(self, body: String) -> Self::Response {
        self.status(200).html_body(body).build()
    }

    /// Create a page with an explicit status (e.g. 403 for a denied login)
    fn html_with_status(self, code: u16, body: String) -> Self::Response {
        self.status(code).html_body(body).build()
    }

    /// Create a 303 See Other redirect, so a POST is followed by a GET
    fn see_other(self, location: &str) -> Self::Response {
        self.status(303).header("location", location).build()
    }
}

// Blanket implementation for all PortalResponseBuilder types
impl<T: PortalResponseBuilder> PortalResponseHelpers for T {}
