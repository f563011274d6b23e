use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portal_adapters::HandlerError;
use thiserror::Error;

/// Failures that leave no interactive page to return.
#[derive(Debug, Error)]
pub enum PortalApiError {
    #[error("Handler failed: {0}")]
    Handler(#[from] HandlerError),
}

impl IntoResponse for PortalApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        let (status, message) = match self {
            PortalApiError::Handler(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Não foi possível carregar a página. Tente novamente.",
            ),
        };

        (status, message).into_response()
    }
}
