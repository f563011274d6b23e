//! Framework-agnostic federated login handlers.

use portal_application::{AccessGate, Banner, FederatedLoginError, GateMode, messages};
use portal_core::{
    IdentityProvider, PortalRequest, PortalResponseBuilder, PortalResponseHelpers,
    RegistrationEndpoint,
};
use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;

use super::{HandlerError, PortalContext, render_gate};
use crate::config::routes;

const STATE_LENGTH: usize = 32;

/// Query string the identity provider appends when redirecting back.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Send the browser to the identity provider.
///
/// A fresh `state` nonce is stored in a cookie and checked on the callback.
#[tracing::instrument(name = "Begin federated login", skip_all)]
pub fn handle_begin_federated<P, R, Req, B>(
    context: &PortalContext<P, R>,
    request: &Req,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
    Req: PortalRequest,
    B: PortalResponseBuilder,
{
    let state: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect();

    match context.federated_login.begin(&state) {
        Ok(url) => Ok(builder
            .cookie(&context.cookies.set_oauth_state(&state))
            .see_other(&url)),
        Err(e) => {
            tracing::error!(error = %e, "could not build authorization url");
            let mut gate = AccessGate::new(GateMode::FederatedLogin);
            gate.notify(Banner::error(messages::LOGIN_FAILED));
            render_gate(context, request, &gate, 502, builder)
        }
    }
}

/// Complete the federated round trip.
///
/// The code is exchanged once. An institutional account gets the session
/// cookie and lands on the dashboard; any other account gets the denial banner.
#[tracing::instrument(name = "Federated login callback", skip_all)]
pub async fn handle_federated_callback<P, R, Req, B>(
    context: &PortalContext<P, R>,
    request: &Req,
    query: &CallbackQuery,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
    Req: PortalRequest,
    B: PortalResponseBuilder,
{
    let builder = builder.cookie(&context.cookies.clear_oauth_state());
    let mut gate = AccessGate::new(GateMode::FederatedLogin);

    let expected_state = context.cookies.oauth_state(request);
    let (code, state) = match (&query.code, &query.state) {
        (Some(code), Some(state)) if expected_state == Some(state.as_str()) => (code, state),
        _ => {
            tracing::warn!(
                provider_error = query.error.as_deref(),
                "federated callback without a matching state"
            );
            gate.notify(Banner::error(messages::LOGIN_FAILED));
            return render_gate(context, request, &gate, 400, builder);
        }
    };

    let key = context.cookies.gate_id(request).unwrap_or(state.as_str());
    let Some(_guard) = context.in_flight.try_begin(key) else {
        gate.refuse_busy();
        return render_gate(context, request, &gate, 409, builder);
    };

    gate.start_loading();
    let outcome = context.federated_login.complete(code).await;

    if let Ok(session) = &outcome {
        return Ok(builder
            .cookie(&context.cookies.set_session(session.token()))
            .see_other(routes::DASHBOARD_SIGNED_IN));
    }

    gate.finish_federated_login(&outcome);
    let status = match outcome {
        Err(FederatedLoginError::Denied) => 403,
        _ => 502,
    };
    render_gate(context, request, &gate, status, builder)
}
