//! Framework-agnostic Access Gate page handler.

use portal_application::{AccessGate, Banner, GateMode, messages};
use portal_core::{IdentityProvider, PortalRequest, PortalResponseBuilder, RegistrationEndpoint};
use serde::Deserialize;

use super::{HandlerError, PortalContext, render_gate};

#[derive(Debug, Default, Deserialize)]
pub struct GateQuery {
    pub mode: Option<String>,
    pub notice: Option<String>,
}

impl GateQuery {
    pub fn gate_mode(&self) -> GateMode {
        match self.mode.as_deref() {
            Some("registration") => GateMode::RegistrationForm,
            _ => GateMode::FederatedLogin,
        }
    }

    pub fn banner(&self) -> Option<Banner> {
        match self.notice.as_deref() {
            Some("signed_out") => Some(Banner::info(messages::SIGNED_OUT)),
            Some("session_ended") => Some(Banner::info(messages::SESSION_ENDED)),
            _ => None,
        }
    }
}

/// Handle a request for the Access Gate.
///
/// The mode is chosen explicitly through `?mode=`; federated login is the default.
pub fn handle_gate_page<P, R, Req, B>(
    context: &PortalContext<P, R>,
    request: &Req,
    query: &GateQuery,
    builder: B,
) -> Result<B::Response, HandlerError>
where
    P: IdentityProvider,
    R: RegistrationEndpoint,
    Req: PortalRequest,
    B: PortalResponseBuilder,
{
    let mut gate = AccessGate::new(query.gate_mode());
    if let Some(banner) = query.banner() {
        gate.notify(banner);
    }

    render_gate(context, request, &gate, 200, builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cookies::GATE_COOKIE_NAME;
    use crate::handlers::test_support::{MockRequest, MockResponse, context, provider};
    use crate::registration::MockRegistrationEndpoint;

    #[test]
    fn test_first_visit_issues_gate_cookie() {
        let context = context(provider(), MockRegistrationEndpoint::new());

        let response = handle_gate_page(
            &context,
            &MockRequest::default(),
            &GateQuery::default(),
            MockResponse::default(),
        )
        .unwrap();

        assert_eq!(response.status, 200);
        assert!(
            response
                .set_cookies()
                .iter()
                .any(|c| c.starts_with(GATE_COOKIE_NAME))
        );
        assert!(response.body.contains("/auth/federated"));
    }

    #[test]
    fn test_returning_visit_keeps_gate_cookie() {
        let context = context(provider(), MockRegistrationEndpoint::new());
        let request = MockRequest::default().with_cookie(GATE_COOKIE_NAME, "gate-1");

        let response = handle_gate_page(
            &context,
            &request,
            &GateQuery {
                mode: Some("registration".to_owned()),
                notice: None,
            },
            MockResponse::default(),
        )
        .unwrap();

        assert!(response.set_cookies().is_empty());
        assert!(response.body.contains("name=\"captcha_token\""));
    }

    #[test]
    fn test_signed_out_notice_is_shown() {
        let context = context(provider(), MockRegistrationEndpoint::new());

        let response = handle_gate_page(
            &context,
            &MockRequest::default(),
            &GateQuery {
                mode: None,
                notice: Some("signed_out".to_owned()),
            },
            MockResponse::default(),
        )
        .unwrap();

        assert!(response.body.contains(messages::SIGNED_OUT));
    }
}
