//! Axum-specific sign-out route.

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use portal_adapters::{PortalContext, handlers};
use portal_core::{IdentityProvider, RegistrationEndpoint};

use super::PortalApiError;
use crate::adapters::{AxumRequest, response_builder};

/// Axum route for `POST /logout`.
///
/// The actual sign-out logic is in the framework-agnostic handler.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<P, R>(
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

    Ok(handlers::handle_sign_out(&context, &request, response_builder()).await?)
}
