//! Framework-agnostic Session Dashboard page handler.

use std::sync::Arc;

use askama::Template;
use portal_application::{Banner, DEFAULT_PANELS, Destination, Navigator, messages};
use portal_core::{
    IdentityProvider, PortalRequest, PortalResponseBuilder, PortalResponseHelpers,
    RegistrationEndpoint,
};
use serde::Deserialize;

use super::{HandlerError, PortalContext};
use crate::{config::routes, views::DashboardPage};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub notice: Option<String>,
}

impl DashboardQuery {
    pub fn banner(&self) -> Option<Banner> {
        match self.notice.as_deref() {
            Some("signed_in") => Some(Banner::success(messages::LOGIN_SUCCESS)),
            _ => None,
        }
    }
}

/// Page renders observe the redirect through the activation state.
pub(crate) fn page_navigator() -> Arc<dyn Navigator> {
    Arc::new(|_: Destination| {})
}

/// Handle a request for the dashboard.
///
/// Without a live session the browser is redirected to the gate before any
/// dashboard content is produced.
#[tracing::instrument(name = "Dashboard page", skip_all)]
pub async fn handle_dashboard_page<P, R, Req, B>(
    context: &PortalContext<P, R>,
    request: &Req,
    query: &DashboardQuery,
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
        let builder = match token {
            Some(_) => builder.cookie(&context.cookies.clear_session()),
            None => builder,
        };
        return Ok(builder.see_other(routes::GATE));
    };

    let banner = query.banner();
    let page = DashboardPage::new(session.email().expose(), DEFAULT_PANELS, banner.as_ref())
        .render()?;

    Ok(builder
        .header("cache-control", "no-store")
        .ok_html(page))
}
