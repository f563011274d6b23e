//! Framework-agnostic source of the dashboard's live session events.

use std::sync::Arc;

use portal_application::{DashboardActivation, Destination, Navigator};
use portal_core::{IdentityProvider, PortalRequest, RegistrationEndpoint};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::PortalContext;
use crate::config::routes;

/// One dashboard activation and the navigation requests it produces.
///
/// The activation owns the session subscription, so the subscription lives
/// exactly as long as this value.
pub struct DashboardEvents {
    activation: DashboardActivation,
    receiver: UnboundedReceiver<Destination>,
}

impl DashboardEvents {
    pub fn activation(&self) -> &DashboardActivation {
        &self.activation
    }

    pub fn into_parts(self) -> (DashboardActivation, UnboundedReceiver<Destination>) {
        (self.activation, self.receiver)
    }
}

/// Where the browser goes for a navigation request.
pub fn destination_url(destination: Destination) -> &'static str {
    match destination {
        Destination::AccessGate => routes::GATE_SESSION_ENDED,
    }
}

/// Activate the dashboard for a long-lived event stream.
///
/// An activation without a live session has already queued its redirect.
#[tracing::instrument(name = "Open dashboard events", skip_all)]
pub async fn open_dashboard_events<P, R, Req>(
    context: &PortalContext<P, R>,
    request: &Req,
) -> DashboardEvents
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
    Req: PortalRequest,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let navigator: Arc<dyn Navigator> = Arc::new(move |destination: Destination| {
        if sender.send(destination).is_err() {
            tracing::debug!("dashboard event stream already closed");
        }
    });

    let token = context.cookies.session_token(request);
    let activation = context.dashboard.activate(token.as_ref(), navigator).await;

    DashboardEvents {
        activation,
        receiver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cookies::SESSION_COOKIE_NAME;
    use crate::handlers::test_support::{
        MockRequest, context, institutional_email, provider,
    };
    use crate::registration::MockRegistrationEndpoint;

    #[tokio::test]
    async fn test_missing_session_queues_redirect() {
        let context = context(provider(), MockRegistrationEndpoint::new());

        let events = open_dashboard_events(&context, &MockRequest::default()).await;
        let (activation, mut receiver) = events.into_parts();

        assert!(activation.is_redirecting());
        assert_eq!(receiver.recv().await, Some(Destination::AccessGate));
    }

    #[tokio::test]
    async fn test_provider_expiry_reaches_stream() {
        let provider = provider();
        let session = provider.issue_session(institutional_email());
        let context = context(provider.clone(), MockRegistrationEndpoint::new());
        let request =
            MockRequest::default().with_cookie(SESSION_COOKIE_NAME, session.token().expose());

        let events = open_dashboard_events(&context, &request).await;
        assert!(events.activation().session().is_some());
        assert_eq!(provider.observer_count(session.token()), 1);

        provider.expire(session.token());

        let (activation, mut receiver) = events.into_parts();
        assert_eq!(receiver.recv().await, Some(Destination::AccessGate));
        assert!(activation.is_redirecting());
    }

    #[tokio::test]
    async fn test_dropping_events_releases_subscription() {
        let provider = provider();
        let session = provider.issue_session(institutional_email());
        let context = context(provider.clone(), MockRegistrationEndpoint::new());
        let request =
            MockRequest::default().with_cookie(SESSION_COOKIE_NAME, session.token().expose());

        let events = open_dashboard_events(&context, &request).await;
        drop(events);

        assert_eq!(provider.observer_count(session.token()), 0);
    }
}
