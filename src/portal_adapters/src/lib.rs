pub mod config;
pub mod handlers;
pub mod http;
pub mod identity;
pub mod registration;
pub mod views;

pub use handlers::{HandlerError, PortalContext};
pub use http::PortalCookies;
pub use identity::{HttpIdentityProvider, InMemoryIdentityProvider, SessionEventHub};
pub use registration::{HttpRegistrationEndpoint, MockRegistrationEndpoint, RecordedSubmission};
