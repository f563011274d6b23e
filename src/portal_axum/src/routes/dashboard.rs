//! Axum-specific dashboard routes.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Method, Uri},
    response::{
        Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use portal_adapters::{
    PortalContext,
    handlers::{self, DashboardQuery, destination_url},
};
use portal_core::{IdentityProvider, RegistrationEndpoint};
use tokio_stream::{Stream, StreamExt, wrappers::UnboundedReceiverStream};

use super::PortalApiError;
use crate::adapters::{AxumRequest, response_builder};

const REDIRECT_EVENT: &str = "redirect";
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Axum route for `GET /dashboard`.
#[tracing::instrument(name = "Dashboard page", skip_all)]
pub async fn dashboard_page<P, R>(
    State(context): State<PortalContext<P, R>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, PortalApiError>
where
    P: IdentityProvider + 'static,
    R: RegistrationEndpoint + 'static,
{
    let request = AxumRequest::new(method, uri, headers);

    Ok(handlers::handle_dashboard_page(&context, &request, &query, response_builder()).await?)
}

/// Axum route for `GET /dashboard/events`.
///
/// Streams a single `redirect` event once the session is lost. The stream owns
/// the dashboard activation, so closing it releases the session subscription.
#[tracing::instrument(name = "Dashboard events", skip_all)]
pub async fn dashboard_events<P, R>(
    State(context): State<PortalContext<P, R>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    P: IdentityProvider + 'static,
    R: RegistrationEndpoint + 'static,
{
    let request = AxumRequest::new(method, uri, headers);
    let (activation, receiver) = handlers::open_dashboard_events(&context, &request)
        .await
        .into_parts();

    let stream = UnboundedReceiverStream::new(receiver)
        .map(move |destination| {
            tracing::info!(
                redirecting = activation.is_redirecting(),
                "pushing dashboard redirect"
            );
            Ok(Event::default()
                .event(REDIRECT_EVENT)
                .data(destination_url(destination)))
        })
        .take(1);

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
}
