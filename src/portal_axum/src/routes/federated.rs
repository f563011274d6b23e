//! Axum-specific federated login routes.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use portal_adapters::{
    PortalContext,
    handlers::{self, CallbackQuery},
};
use portal_core::{IdentityProvider, RegistrationEndpoint};

use super::PortalApiError;
use crate::adapters::{AxumRequest, response_builder};

/// Axum route for `POST /auth/federated`.
#[tracing::instrument(name = "Begin federated login", skip_all)]
pub async fn begin_federated<P, R>(
    State(context): State<PortalContext<P, R>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, PortalApiError>
where
    P: IdentityProvider + 'static,
    R: RegistrationEndpoint + 'static,
{
    let request = AxumRequest::new(method, uri, headers);

    Ok(handlers::handle_begin_federated(
        &context,
        &request,
        response_builder(),
    )?)
}

/// Axum route for `GET /auth/callback`.
#[tracing::instrument(name = "Federated callback", skip_all)]
pub async fn federated_callback<P, R>(
    State(context): State<PortalContext<P, R>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, PortalApiError>
where
    P: IdentityProvider + 'static,
    R: RegistrationEndpoint + 'static,
{
    let request = AxumRequest::new(method, uri, headers);

    Ok(handlers::handle_federated_callback(&context, &request, &query, response_builder()).await?)
}
