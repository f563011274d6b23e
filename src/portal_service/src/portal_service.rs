use axum::{
    Router,
    routing::{get, post},
};
use portal_adapters::{PortalContext, config::routes};
use portal_axum::routes::{
    begin_federated, dashboard_events, dashboard_page, federated_callback, gate_page, logout,
    register,
};
use portal_core::{IdentityProvider, RegistrationEndpoint};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The student portal: access gate, registration form and session dashboard.
pub struct PortalService {
    router: Router,
}

impl PortalService {
    /// Create a new PortalService around a shared handler context
    ///
    /// # Arguments
    /// * `context` - Use cases, cookie policy and in-flight registry shared by every route
    /// * `assets_dir` - Directory served under `/assets` (stylesheet and page script)
    pub fn new<P, R>(context: PortalContext<P, R>, assets_dir: String) -> Self
    where
        P: IdentityProvider + 'static,
        R: RegistrationEndpoint + 'static,
    {
        let router = Router::new()
            // Access gate
            .route(routes::GATE, get(gate_page::<P, R>))
            .route(routes::BEGIN_FEDERATED, post(begin_federated::<P, R>))
            .route(routes::FEDERATED_CALLBACK, get(federated_callback::<P, R>))
            .route(routes::REGISTER, post(register::<P, R>))
            // Session dashboard
            .route(routes::DASHBOARD, get(dashboard_page::<P, R>))
            .route(routes::DASHBOARD_EVENTS, get(dashboard_events::<P, R>))
            .route(routes::LOGOUT, post(logout::<P, R>))
            .nest_service(routes::ASSETS, ServeDir::new(assets_dir))
            .with_state(context);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    pub fn as_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the portal as a standalone server
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.as_router();

        tracing::info!("Portal listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
