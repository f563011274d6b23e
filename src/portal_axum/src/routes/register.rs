//! Axum-specific registration route.

use axum::{
    Form,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use portal_adapters::{PortalContext, handlers};
use portal_application::RegistrationForm;
use portal_core::{IdentityProvider, RegistrationEndpoint};
use serde::Deserialize;

use super::PortalApiError;
use crate::adapters::{AxumRequest, response_builder};

/// Form body posted by the registration screen.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationFormBody {
    pub email: String,
    pub cpf: String,
    pub captcha_token: Option<String>,
}

impl From<RegistrationFormBody> for RegistrationForm {
    fn from(body: RegistrationFormBody) -> Self {
        RegistrationForm {
            email: body.email,
            cpf: body.cpf,
            captcha_token: body.captcha_token,
        }
    }
}

/// Axum route for `POST /register`.
#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<P, R>(
    State(context): State<PortalContext<P, R>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Form(body): Form<RegistrationFormBody>,
) -> Result<Response, PortalApiError>
where
    P: IdentityProvider + 'static,
    R: RegistrationEndpoint + 'static,
{
    let request = AxumRequest::new(method, uri, headers);

    Ok(handlers::handle_register(&context, &request, body.into(), response_builder()).await?)
}
