//! Axum-specific route handlers.
//!
//! These routes are Axum-specific - they use Axum's extractors to get data from requests,
//! call the framework-agnostic handlers, and convert results to Axum responses.

pub mod dashboard;
pub mod error;
pub mod federated;
pub mod gate;
pub mod logout;
pub mod register;

pub use dashboard::{dashboard_events, dashboard_page};
pub use error::PortalApiError;
pub use federated::{begin_federated, federated_callback};
pub use gate::gate_page;
pub use logout::logout;
pub use register::register;
