//! Axum integration for the student portal.
//!
//! This crate provides Axum adapters for the framework-agnostic screen
//! handlers defined in `portal_adapters`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  portal_core: HTTP trait definitions     │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  portal_axum: Axum implementations       │
//! │  - AxumRequest newtype wrapper           │
//! │  - AxumResponseBuilder                   │
//! │  - Axum route handlers (pages + SSE)     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use portal_axum::routes;
//!
//! let app = Router::new()
//!     .route("/", get(routes::gate_page::<P, R>))
//!     .route("/register", post(routes::register::<P, R>))
//!     .with_state(context);
//! ```

pub mod adapters;
pub mod routes;

// Re-export for convenience
pub use adapters::{AxumRequest, AxumResponseBuilder, response_builder};
pub use routes::PortalApiError;
