//! Framework-agnostic screen handlers.
//!
//! These handlers contain the portal's request logic without any framework dependencies.
//! Framework-specific routes (Axum, Actix, etc.) extract data from requests, call these handlers,
//! and convert the results back to framework responses.

pub mod context;
pub mod dashboard;
pub mod events;
pub mod federated;
pub mod gate;
pub mod register;
pub mod sign_out;

pub use context::PortalContext;
pub use dashboard::{DashboardQuery, handle_dashboard_page};
pub use events::{DashboardEvents, destination_url, open_dashboard_events};
pub use federated::{CallbackQuery, handle_begin_federated, handle_federated_callback};
pub use gate::{GateQuery, handle_gate_page};
pub use register::handle_register;
pub use sign_out::handle_sign_out;

use askama::Template;
use portal_application::AccessGate;
use portal_core::{IdentityProvider, PortalRequest, PortalResponseBuilder, RegistrationEndpoint};

use crate::views::GatePage;

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),
}

/// Render the gate page, issuing a gate id cookie when the browser has none.
pub(crate) fn render_gate<P, R, Req, B>(
    context: &PortalContext<P, R>,
    request: &Req,
    gate: &AccessGate,
    status: u16,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
    Req: PortalRequest,
    B: PortalResponseBuilder,
{
    let builder = match context.cookies.gate_id(request) {
        Some(_) => builder,
        None => builder.cookie(&context.cookies.set_gate_id(&new_gate_id())),
    };

    render_gate_page(context, gate, status, builder)
}

/// Render the gate page with whatever cookies the builder already carries.
pub(crate) fn render_gate_page<P, R, B>(
    context: &PortalContext<P, R>,
    gate: &AccessGate,
    status: u16,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
    B: PortalResponseBuilder,
{
    let page = GatePage::new(gate, &context.captcha_site_key, &context.domain).render()?;

    Ok(builder.status(status).html_body(page).build())
}

pub(crate) fn new_gate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
