//! Axum-specific Access Gate route.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use portal_adapters::{
    PortalContext,
    handlers::{self, GateQuery},
};
use portal_core::{IdentityProvider, RegistrationEndpoint};

use super::PortalApiError;
use crate::adapters::{AxumRequest, response_builder};

/// Axum route for `GET /`.
#[tracing::instrument(name = "Gate page", skip_all)]
pub async fn gate_page<P, R>(
    State(context): State<PortalContext<P, R>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<GateQuery>,
) -> Result<Response, PortalApiError>
where
    P: IdentityProvider + 'static,
    R: RegistrationEndpoint + 'static,
{
    let request = AxumRequest::new(method, uri, headers);

    Ok(handlers::handle_gate_page(
        &context,
        &request,
        &query,
        response_builder(),
    )?)
}
