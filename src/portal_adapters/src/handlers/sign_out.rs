//! Framework-agnostic sign-out handler.

use askama::Template;
use portal_application::{Banner, DEFAULT_PANELS, messages};
use portal_core::{
    IdentityProvider, PortalRequest, PortalResponseBuilder, PortalResponseHelpers,
    RegistrationEndpoint,
};

use super::{HandlerError, PortalContext, dashboard::page_navigator};
use crate::{config::routes, views::DashboardPage};

/// Handle a sign-out request from the dashboard.
///
/// On success the session cookie is cleared and the browser returns to the
/// gate. On failure the dashboard is shown again with an error banner and the
/// cookie is kept. Nothing is retried.
#[tracing::instrument(name = "Sign out", skip_all)]
pub async fn handle_sign_out<P, R, Req, B>(
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
    let token = context.cookies.session_token(request);
    let activation = context
        .dashboard
        .activate_unobserved(token.as_ref(), page_navigator())
        .await;

    let Some(session) = activation.session() else {
        return Ok(builder
            .cookie(&context.cookies.clear_session())
            .see_other(routes::GATE));
    };

    match activation.sign_out(&*context.sign_out).await {
        Ok(()) => Ok(builder
            .cookie(&context.cookies.clear_session())
            .see_other(routes::GATE_SIGNED_OUT)),
        Err(e) => {
            tracing::warn!(error = %e, "sign-out failed");
            let banner = Banner::error(messages::SIGN_OUT_FAILED);
            let page =
                DashboardPage::new(session.email().expose(), DEFAULT_PANELS, Some(&banner))
                    .render()?;
            Ok(builder.html_with_status(502, page))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cookies::SESSION_COOKIE_NAME;
    use crate::handlers::test_support::{
        MockRequest, MockResponse, context, institutional_email, provider,
    };
    use crate::registration::MockRegistrationEndpoint;

    #[tokio::test]
    async fn test_sign_out_clears_cookie_and_returns_to_gate() {
        let provider = provider();
        let session = provider.issue_session(institutional_email());
        let context = context(provider.clone(), MockRegistrationEndpoint::new());
        let request =
            MockRequest::default().with_cookie(SESSION_COOKIE_NAME, session.token().expose());

        let response = handle_sign_out(&context, &request, MockResponse::default())
            .await
            .unwrap();

        assert_eq!(response.status, 303);
        assert_eq!(
            response.header_value("location"),
            Some(routes::GATE_SIGNED_OUT)
        );
        assert!(
            response
                .set_cookies()
                .iter()
                .any(|c| c.starts_with(SESSION_COOKIE_NAME) && c.contains("Max-Age=0"))
        );
        assert!(!provider.has_session(session.token()));
    }

    #[tokio::test]
    async fn test_failed_sign_out_keeps_session_and_shows_error() {
        let provider = provider();
        let session = provider.issue_session(institutional_email());
        provider.fail_sign_out(true);
        let context = context(provider.clone(), MockRegistrationEndpoint::new());
        let request =
            MockRequest::default().with_cookie(SESSION_COOKIE_NAME, session.token().expose());

        let response = handle_sign_out(&context, &request, MockResponse::default())
            .await
            .unwrap();

        assert_eq!(response.status, 502);
        assert!(response.body.contains(messages::SIGN_OUT_FAILED));
        assert!(response.set_cookies().is_empty());
        assert!(provider.has_session(session.token()));
    }
}
